use pitstop_boundary as json;
use pitstop_core::{
    gateways::{backend::EntryGateway, Error, Result},
    mutation::{NewComment, NewEntry},
};
use pitstop_entities::{entry::Entry, id::Id};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

/// Client of the backend HTTP API.
#[derive(Debug, Clone)]
pub struct EntryApi {
    url: String,
    collection: String,
    client: Client,
}

impl EntryApi {
    pub fn new(url: String, collection: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            collection: collection.trim_matches('/').to_owned(),
            client: Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.url, self.collection)
    }

    fn comment_url(&self, entry_id: &Id) -> String {
        format!("{}/{entry_id}/comment", self.collection_url())
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}

/// Ensure we've got a 2xx status.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let message = match serde_json::from_str::<json::Error>(&body) {
        Ok(err) => err.message,
        Err(_) => body,
    };
    Err(Error::Status {
        code: status.as_u16(),
        message,
    })
}

fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    check_status(response)?
        .json()
        .map_err(|err| Error::Decode(err.to_string()))
}

pub fn new_entry_to_json(new_entry: &NewEntry) -> json::NewEntry {
    let NewEntry {
        name,
        description,
        pos,
        address,
        summary,
        comments,
        ratings,
        created_at,
    } = new_entry;
    let (lat, lng) = pos.to_lat_lng_deg();
    json::NewEntry {
        name: name.clone(),
        description: description.clone(),
        lat,
        lng,
        address: address.clone(),
        summary: summary.clone(),
        comments: comments.iter().cloned().map(Into::into).collect(),
        ratings: (*ratings).into(),
        created_at: created_at.to_rfc3339(),
    }
}

pub fn new_comment_to_json(comment: &NewComment) -> json::NewComment {
    json::NewComment {
        text: comment.text.clone(),
        timestamp: comment.created_at.to_rfc3339(),
        ratings: comment.ratings.into(),
    }
}

/// Convert the entries of the backend, skipping those that are broken.
pub fn entries_from_json(entries: Vec<json::Entry>) -> Vec<Entry> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let id = entry.id.clone();
            Entry::try_from(entry)
                .map_err(|err| log::warn!("Skipping invalid entry {id}: {err}"))
                .ok()
        })
        .collect()
}

impl EntryGateway for EntryApi {
    fn all_entries(&self) -> Result<Vec<Entry>> {
        let url = self.collection_url();
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().map_err(transport)?;
        let entries: Vec<json::Entry> = into_json(response)?;
        Ok(entries_from_json(entries))
    }

    fn create_entry(&self, new_entry: &NewEntry) -> Result<Entry> {
        let url = self.collection_url();
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(&new_entry_to_json(new_entry))
            .send()
            .map_err(transport)?;
        let entry: json::Entry = into_json(response)?;
        Entry::try_from(entry).map_err(|err| Error::Decode(err.to_string()))
    }

    fn add_comment(&self, entry_id: &Id, comment: &NewComment) -> Result<()> {
        let url = self.comment_url(entry_id);
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(&new_comment_to_json(comment))
            .send()
            .map_err(transport)?;
        let response = check_status(response)?;
        // Any 2xx counts as acknowledgement, whatever the body says.
        if let Ok(ack) = response.json::<json::Ack>() {
            log::debug!("Comment acknowledged: {}", ack.ok);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitstop_entities::{comment::Comment, geo::MapPoint, rating::*, time::Timestamp};

    #[test]
    fn urls() {
        let api = EntryApi::new("http://localhost:3000/".into(), "/toilets/".into());
        assert_eq!(api.collection_url(), "http://localhost:3000/toilets");
        assert_eq!(
            api.comment_url(&"4f1a".into()),
            "http://localhost:3000/toilets/4f1a/comment"
        );
    }

    #[test]
    fn new_entry_payload() {
        let now = Timestamp::from_secs(1_714_564_800);
        let ratings = RatingTriple {
            cleanliness: RatingValue::max(),
            accessibility: RatingValue::try_from(4_u8).unwrap(),
            crowd: RatingValue::default(),
        };
        let new_entry = NewEntry::new(
            "Clean Stop".into(),
            "".into(),
            MapPoint::from_lat_lng_deg(35.001, 139.001),
            "Tokyo, JP".into(),
            ratings,
            now,
        );
        let payload = serde_json::to_value(new_entry_to_json(&new_entry)).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "name": "Clean Stop",
                "description": "",
                "lat": 35.001,
                "lng": 139.001,
                "address": "Tokyo, JP",
                "summary": "",
                "comments": [{ "text": "", "timestamp": "2024-05-01T12:00:00Z" }],
                "ratings": { "cleanliness": 5, "accessibility": 4, "crowd": 3 },
                "createdAt": "2024-05-01T12:00:00Z"
            })
        );
    }

    #[test]
    fn new_comment_payload() {
        let comment = NewComment {
            text: "Very clean".into(),
            created_at: Timestamp::from_secs(1_714_564_800),
            ratings: RatingTriple::default(),
        };
        let payload = serde_json::to_value(new_comment_to_json(&comment)).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "text": "Very clean",
                "timestamp": "2024-05-01T12:00:00Z",
                "ratings": { "cleanliness": 3, "accessibility": 3, "crowd": 3 }
            })
        );
    }

    #[test]
    fn skip_broken_entries() {
        let entries: Vec<json::Entry> = serde_json::from_value(serde_json::json!([
            {
                "id": "ok",
                "name": "Fine",
                "lat": 35.0,
                "lng": 139.0,
                "createdAt": "2024-05-01T12:00:00"
            },
            {
                "id": "broken",
                "name": "Nowhere",
                "lat": 135.0,
                "lng": 139.0,
                "createdAt": "2024-05-01T12:00:00"
            }
        ]))
        .unwrap();
        let entries = entries_from_json(entries);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_str(), "ok");
        assert_eq!(entries[0].comments, Vec::<Comment>::new());
    }
}
