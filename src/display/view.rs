//! Terminal view: prints a region every time its content changes.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::region::Dashboard;

/// Format one region for the terminal.
pub fn format_block(id: &str, content: &str) -> String {
    let mut block = format!("[{}]", id);
    for line in content.lines() {
        block.push_str("\n  ");
        block.push_str(line);
    }
    block
}

/// Print every region change to stdout until the regions are dropped or the
/// returned task is aborted.
pub fn spawn_terminal_view(dashboard: &Dashboard) -> JoinHandle<()> {
    spawn_view(dashboard, |block| println!("{}", block))
}

/// Subscribe to both regions now, then hand each formatted change to `emit`.
///
/// Subscribing before the task is spawned means a render that lands before
/// the task first runs is still seen.
fn spawn_view<F>(dashboard: &Dashboard, emit: F) -> JoinHandle<()>
where
    F: Fn(String) + Send + Sync + 'static,
{
    let info = dashboard.app_info.id();
    let info_rx = dashboard.app_info.subscribe();
    let health = dashboard.health_status.id();
    let health_rx = dashboard.health_status.subscribe();

    tokio::spawn(async move {
        tokio::join!(follow(info, info_rx, &emit), follow(health, health_rx, &emit));
    })
}

async fn follow<F: Fn(String)>(id: &'static str, mut rx: watch::Receiver<String>, emit: &F) {
    // The channel closes once the poller drops its region clones.
    while rx.changed().await.is_ok() {
        let content = rx.borrow_and_update().clone();
        emit(format_block(id, &content));
    }

    debug!(region = id, "Region closed, view stopped");
}
