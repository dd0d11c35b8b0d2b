use ticktimer_shared::TimerDuration;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Notifier {
    replace_id: u32,
    handle: Option<notify_rust::NotificationHandle>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let s = Self {
            replace_id: 4242u32,
            handle: None,
        };
        debug!("Linux Notifier created");
        s
    }

    pub async fn show_completed(&mut self, duration: TimerDuration) {
        debug!(
            %duration,
            replace_id = self.replace_id,
            "show_completed: building notification"
        );
        let mut n = notify_rust::Notification::new();
        let res = n
            .appname("ticktimer")
            .summary("Timer completed!")
            .body(&format!("{duration} countdown finished."))
            .id(self.replace_id)
            .urgency(notify_rust::Urgency::Critical)
            .show_async()
            .await;

        match res {
            Ok(handle) => {
                debug!("show_completed: notification shown");
                self.handle = Some(handle);
            }
            Err(e) => {
                warn!(error=%e, "notify-rust failed while showing completion");
                self.handle = None;
                info!("[TIMER] {duration} countdown finished");
            }
        }
    }

    pub async fn close(&mut self) {
        if self.handle.take().is_some() {
            debug!("close: replacing with short-timeout notification");
            // Replace the visible notification with one that expires at once.
            let mut n = notify_rust::Notification::new();
            let _ = n
                .appname("ticktimer")
                .summary("Timer reset")
                .id(self.replace_id)
                .urgency(notify_rust::Urgency::Low)
                .timeout(notify_rust::Timeout::Milliseconds(1))
                .show_async()
                .await;
        }
    }
}
