//! MedLedger: connects the configured wallet provider and prints the
//! resulting session and notifications.

use medledger::display::session_label;
use medledger::telemetry::init_tracing;
use medledger::DashboardBridge;

#[tokio::main]
async fn main() {
    init_tracing();

    let bridge = DashboardBridge::default();
    let _watcher = bridge.spawn_event_watcher();

    let ctx = bridge.context();
    ctx.connect_wallet().await;
    ctx.sync_provider().await;

    println!("{}", session_label(&ctx.session()));
    for note in ctx.notifications() {
        println!("[{:?}] {}", note.kind, note.message);
    }
}
