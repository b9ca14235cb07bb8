use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use rumqttc::{Client, Event, MqttOptions, Packet, QoS};
use tracing::{debug, info, warn};

use super::{redraw::RedrawNotifier, signals::ShutdownFlag};
use crate::panel::{
    config::MqttSettings, context::PanelContext, ingest::InboundRouter, PanelError, Result,
};

const REQUEST_CAPACITY: usize = 16;
const BACKOFF_START: Duration = Duration::from_secs(1);
const BACKOFF_MAX: Duration = Duration::from_secs(30);

fn options(settings: &MqttSettings) -> MqttOptions {
    let mut options = MqttOptions::new(
        settings.client_id.as_str(),
        settings.host.as_str(),
        settings.port,
    );
    options.set_keep_alive(Duration::from_secs(settings.keep_alive_secs.max(5)));
    options.set_clean_session(true);
    if let Some(username) = &settings.username {
        options.set_credentials(
            username.as_str(),
            settings.password.clone().unwrap_or_default(),
        );
    }
    options
}

/// Subscribes to `<prefix>/#` and routes every publish into the panel.
/// The client reconnects on its own; errors only pace the retries.
pub fn spawn_mqtt_thread(
    settings: &MqttSettings,
    context: Arc<PanelContext>,
    redraw: RedrawNotifier,
    shutdown: ShutdownFlag,
) -> Result<JoinHandle<()>> {
    let router = InboundRouter::from_settings(settings);
    let subscription = settings.subscription();
    let (client, mut connection) = Client::new(options(settings), REQUEST_CAPACITY);
    info!(
        "mqtt: connecting to {}:{} topic={subscription}",
        settings.host, settings.port
    );

    thread::Builder::new()
        .name("mqtt".into())
        .spawn(move || {
            let mut backoff = BACKOFF_START;
            for notification in connection.iter() {
                if shutdown.is_set() {
                    let _ = client.disconnect();
                    break;
                }
                match notification {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        backoff = BACKOFF_START;
                        // Clean sessions forget subscriptions on reconnect.
                        match client.try_subscribe(subscription.as_str(), QoS::AtMostOnce) {
                            Ok(()) => info!("mqtt: connected, subscribed to {subscription}"),
                            Err(err) => warn!("mqtt: subscribe failed: {err}"),
                        }
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        debug!(
                            "mqtt: publish topic={} bytes={}",
                            publish.topic,
                            publish.payload.len()
                        );
                        let outcome = router.route(&context, &publish.topic, &publish.payload);
                        if outcome.needs_redraw() {
                            redraw.nudge();
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!("mqtt: connection error: {err}; retry in {}s", backoff.as_secs());
                        thread::sleep(backoff);
                        backoff = (backoff * 2).min(BACKOFF_MAX);
                    }
                }
            }
            info!("mqtt: thread stop");
        })
        .map_err(|err| PanelError::Transport {
            details: format!("spawn failed: {err}"),
        })
}
