// CivicDesk terminal host
// Plays the role of the chat widget: reads lines, shows the conversation.

use anyhow::Context;
use civicdesk_core::actors::{ChatHandle, ChatOptions};
use civicdesk_core::assistant::IntentClassifier;
use civicdesk_core::complaints::ComplaintDesk;
use civicdesk_core::config::DeskConfig;
use civicdesk_core::dashboard::DashboardSnapshot;
use civicdesk_core::logging;
use civicdesk_core::models::Message;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

fn render(message: &Message) {
    let speaker = if message.is_assistant { "Assistant" } else { "You" };
    println!("[{}] {}: {}", message.created_at.format("%H:%M:%S"), speaker, message.text);
}

fn print_complaints(desk: &ComplaintDesk) {
    for complaint in desk.list() {
        println!(
            "{}  {:<32} {:<12} {:<18} {:<6} {}",
            complaint.id,
            complaint.title,
            complaint.status,
            complaint.department,
            complaint.priority,
            complaint.date
        );
    }
}

fn print_tracking(desk: &ComplaintDesk, tracking_id: &str) {
    match desk.track(tracking_id) {
        Ok(detail) => {
            println!(
                "{} - {} [{}] ({} priority, {})",
                detail.summary.id,
                detail.summary.title,
                detail.summary.status,
                detail.summary.priority,
                detail.summary.department
            );
            println!("Location: {}", detail.location);
            if let Some(assignee) = &detail.assigned_to {
                println!("Assigned to: {}", assignee);
            }
            for event in &detail.timeline {
                println!("  {} {}  {:<12} {}", event.date, event.time, event.status, event.description);
            }
        }
        Err(e) => println!("{}", e),
    }
}

fn print_dashboard(snapshot: &DashboardSnapshot) {
    for stat in &snapshot.headline {
        println!("{:<20} {:>6} ({:+}%)", stat.title, stat.value, stat.change_percent);
    }
    println!("Resolution rate: {:.1}%", snapshot.resolution_rate() * 100.0);
    if let Some(load) = snapshot.busiest_department() {
        println!("Busiest department: {} ({})", load.department, load.complaints);
    }
    if let Some(days) = snapshot.mean_resolution_days() {
        println!("Mean resolution time: {:.1} days", days);
    }
    for row in snapshot.unassigned() {
        println!("Unassigned: {} {} ({})", row.id, row.title, row.priority);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DeskConfig::from_env().context("loading configuration")?;
    logging::init(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "civicdesk starting");

    let responses = config.response_table().context("loading response table")?;
    let classifier = IntentClassifier::new(responses);
    let desk = ComplaintDesk::new(config.submit_delay());
    let dashboard = DashboardSnapshot::default();

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let chat = ChatHandle::spawn(Arc::new(classifier), ChatOptions::from(&config), Some(events_tx));

    let printer = tokio::spawn(async move {
        while let Some(message) = events_rx.recv().await {
            render(&message);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input.split_once(' ').unwrap_or((input, "")) {
            ("/quit", _) => break,
            ("/complaints", _) => print_complaints(&desk),
            ("/dashboard", _) => print_dashboard(&dashboard),
            ("/track", id) => print_tracking(&desk, id),
            _ => {
                if let Err(e) = chat.send(line.clone()).await {
                    warn!("Message not sent: {}", e);
                }
            }
        }
    }

    if let Err(e) = chat.close().await {
        warn!("Conversation closed early: {}", e);
    }
    printer.await.context("printing conversation")?;
    info!("civicdesk stopped");
    Ok(())
}
