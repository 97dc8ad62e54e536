//! crates/logging/src/tracing_bridge.rs
//! Bridge from the tracing crate into the facility's channels.
//!
//! [`ChannelLayer`] lets code instrumented with the standard tracing macros
//! write through a [`Facility`]. Each event is rendered as one line on the
//! channel matching its level, so tracing output picks up the channel
//! prefixes, the current destinations and the debug channel's level-derived
//! muting.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{Facility, init_tracing};
//!
//! let facility = Facility::new();
//! init_tracing(facility.clone());
//!
//! tracing::warn!(path = "/etc/app.toml", "config missing, using defaults");
//! ```

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer};

use crate::channel::Channel;
use crate::facility::Facility;

/// A tracing layer that forwards events to a [`Facility`].
#[derive(Clone, Debug)]
pub struct ChannelLayer {
    facility: Facility,
}

impl ChannelLayer {
    /// Creates a layer writing through `facility`.
    #[must_use]
    pub const fn new(facility: Facility) -> Self {
        Self { facility }
    }

    /// Maps a tracing level to the channel its events are written on.
    #[must_use]
    pub fn channel_for(level: &Level) -> Channel {
        match *level {
            Level::ERROR => Channel::Error,
            Level::WARN => Channel::Warning,
            Level::INFO => Channel::Info,
            // DEBUG and TRACE
            _ => Channel::Debug,
        }
    }
}

impl<S> Layer<S> for ChannelLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let channel = Self::channel_for(event.metadata().level());
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        // A subscriber has no caller to hand a write failure back to.
        let _ = self.facility.emit(channel, &visitor.finish());
    }
}

/// Collects the `message` field followed by any other fields as `name=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Builds the filter used by [`init_tracing`]: `RUST_LOG` when it is set and
/// valid, otherwise every event.
#[must_use]
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"))
}

/// Installs a global tracing subscriber that writes through `facility`,
/// filtered by [`default_filter`].
///
/// Panics if a global subscriber is already set, matching
/// [`SubscriberInitExt::init`](tracing_subscriber::util::SubscriberInitExt::init).
pub fn init_tracing(facility: Facility) {
    init_tracing_with_filter(facility, default_filter());
}

/// Installs a global tracing subscriber that writes through `facility`,
/// keeping only events `filter` lets through.
///
/// ```rust,ignore
/// use logging::{Facility, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(Facility::new(), EnvFilter::new("warn,app::net=debug"));
/// ```
pub fn init_tracing_with_filter<F>(facility: Facility, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(ChannelLayer::new(facility))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level as FacilityLevel;
    use logging_sink::{LineFormat, MemoryBuffer, Timestamp};
    use tracing_subscriber::layer::SubscriberExt;

    fn captured() -> (Facility, MemoryBuffer, MemoryBuffer) {
        let out = MemoryBuffer::new();
        let err = MemoryBuffer::new();
        let facility = Facility::builder()
            .standard_output(out.shared())
            .standard_error(err.shared())
            .line_format(LineFormat::default().with_timestamp(Timestamp::None))
            .build();
        (facility, out, err)
    }

    #[test]
    fn levels_map_to_channels() {
        assert_eq!(ChannelLayer::channel_for(&Level::ERROR), Channel::Error);
        assert_eq!(ChannelLayer::channel_for(&Level::WARN), Channel::Warning);
        assert_eq!(ChannelLayer::channel_for(&Level::INFO), Channel::Info);
        assert_eq!(ChannelLayer::channel_for(&Level::DEBUG), Channel::Debug);
        assert_eq!(ChannelLayer::channel_for(&Level::TRACE), Channel::Debug);
    }

    #[test]
    fn events_are_written_on_matching_channels() {
        let (facility, out, err) = captured();
        let subscriber = tracing_subscriber::registry().with(ChannelLayer::new(facility));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("starting");
            tracing::warn!(attempt = 2, "retrying");
            tracing::error!("gave up");
            tracing::debug!("muted in normal level");
        });

        assert_eq!(out.lines(), vec!["INFO: starting", "WARNING: retrying attempt=2"]);
        assert_eq!(err.lines(), vec!["ERROR: gave up"]);
    }

    #[test]
    fn debug_events_follow_facility_level() {
        let (facility, out, _err) = captured();
        facility.apply_level(FacilityLevel::Devel);
        let subscriber = tracing_subscriber::registry().with(ChannelLayer::new(facility));

        tracing::subscriber::with_default(subscriber, || {
            tracing::trace!(peer = "10.0.0.7", "handshake");
        });

        assert_eq!(out.lines(), vec!["DEBUG: handshake peer=10.0.0.7"]);
    }

    #[test]
    fn env_filter_drops_events_below_its_level() {
        let (facility, out, err) = captured();
        facility.apply_level(FacilityLevel::Devel);
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("warn"))
            .with(ChannelLayer::new(facility));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("filtered debug");
            tracing::info!("filtered info");
            tracing::warn!("kept warning");
            tracing::error!("kept error");
        });

        assert_eq!(out.lines(), vec!["WARNING: kept warning"]);
        assert_eq!(err.lines(), vec!["ERROR: kept error"]);
    }
}
