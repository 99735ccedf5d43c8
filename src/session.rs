use std::sync::Arc;

use anyhow::Result;
use pitstop_core::app::{self, Cmd, Gateways, Mdl, Msg, OrderQueue, Settings};
use tokio::{
    io::{self, AsyncBufReadExt as _, BufReader},
    sync::mpsc,
};

use crate::ui::{
    self,
    input::{self, InputError},
    render::{self, Screen},
    Action,
};

#[derive(Debug)]
enum Event {
    Input(Result<input::Command, InputError>),
    Completed(Msg),
    InputClosed,
}

/// Run the client until the user quits or stdin is closed.
///
/// The model is owned by this task and every event is processed
/// to completion before the next one is received.
pub async fn run(settings: Settings, gateways: Arc<Gateways>, zoom: u8) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(read_input(tx.clone()));

    let mut orders = OrderQueue::default();
    let mut mdl = app::init(settings, &mut orders);
    println!("{}", render::marker_icons(&mdl));
    println!("Type 'help' for a list of commands.");
    dispatch(orders, &gateways, &tx);
    print_screen(&mdl, zoom);

    while let Some(event) = rx.recv().await {
        let action = match event {
            Event::Input(Ok(cmd)) => ui::action(cmd, &mdl),
            Event::Input(Err(err)) => Action::Reject(err.to_string()),
            Event::Completed(msg) => Action::Update(msg),
            Event::InputClosed => Action::Quit,
        };
        match action {
            Action::Update(msg) => {
                let mut orders = OrderQueue::default();
                app::update(msg, &mut mdl, &mut orders);
                dispatch(orders, &gateways, &tx);
                print_screen(&mdl, zoom);
            }
            Action::Render => print_screen(&mdl, zoom),
            Action::Help => println!("{}", input::HELP),
            Action::Reject(reason) => println!("⚠ {reason}"),
            Action::Quit => break,
        }
    }
    let in_flight = mdl.mutations.in_flight();
    if in_flight > 0 {
        log::warn!("Quitting with {in_flight} pending request(s)");
    }
    Ok(())
}

fn print_screen(mdl: &Mdl, zoom: u8) {
    println!("{}", Screen { mdl, zoom });
}

/// Print the notices and start the commands.
///
/// Each command runs on the blocking thread pool and
/// posts its completion back into the event queue.
fn dispatch(orders: OrderQueue, gateways: &Arc<Gateways>, tx: &mpsc::UnboundedSender<Event>) {
    let OrderQueue { cmds, notices } = orders;
    for notice in notices {
        println!("» {notice}");
    }
    for cmd in cmds {
        log::debug!("Perform {}", cmd_name(&cmd));
        let gateways = Arc::clone(gateways);
        let tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            let msg = cmd.perform(&gateways);
            if tx.send(Event::Completed(msg)).is_err() {
                log::debug!("Discarding a completion after shutdown");
            }
        });
    }
}

fn cmd_name(cmd: &Cmd) -> &'static str {
    match cmd {
        Cmd::FetchEntries => "entry fetch",
        Cmd::Locate => "geolocation request",
        Cmd::ReverseGeocode { .. } => "reverse geocoding lookup",
        Cmd::CreateEntry { .. } => "entry creation",
        Cmd::AddComment { .. } => "comment submission",
    }
}

async fn read_input(tx: mpsc::UnboundedSender<Event>) {
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(line)) => match input::parse(&line) {
                Ok(Some(cmd)) => Event::Input(Ok(cmd)),
                Ok(None) => continue,
                Err(err) => Event::Input(Err(err)),
            },
            Ok(None) => break,
            Err(err) => {
                log::error!("Failed to read input: {err}");
                break;
            }
        };
        if tx.send(event).is_err() {
            return;
        }
    }
    // The receiver might already be gone.
    let _ = tx.send(Event::InputClosed);
}
