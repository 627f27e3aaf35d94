use std::sync::Arc;

use tokio::time::{interval, Instant};

use crate::{
    constants::RATE_LIMIT_SWEEP_INTERVAL, limiter::rate_limiter::FixedWindowLimiter,
    repositories::mail_dispatcher::MailDispatcher,
};

pub async fn start_rate_limit_sweep(limiters: Vec<FixedWindowLimiter>) {
    let mut interval = interval(RATE_LIMIT_SWEEP_INTERVAL);

    loop {
        interval.tick().await;

        let now = Instant::now().into_std();
        let removed: usize = limiters.iter().map(|l| l.purge_expired(now)).sum();
        if removed > 0 {
            tracing::debug!("Evicted {} expired rate-limit entries", removed);
        }
    }
}

pub async fn verify_mail_dispatcher(dispatcher: Arc<dyn MailDispatcher>) {
    match dispatcher.verify().await {
        Ok(()) => tracing::info!("✉️  SMTP relay reachable, ready to send"),
        Err(e) => tracing::error!("SMTP relay verification failed: {}", e),
    }
}
