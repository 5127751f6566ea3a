//! Fill in the attachment fields the event parsers leave empty.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::arn::Arn;
use crate::links::LinkFormatter;
use crate::types::Attachment;

/// Topics longer than this are shortened in the footer.
const MAX_TOPIC_LEN: usize = 40;
const TRUNCATED_TOPIC_LEN: usize = 35;

/// What is known about the event that carried the attachment.
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    pub event_time: Option<DateTime<Utc>>,
    pub subscription_arn: Option<String>,
}

pub fn to_epoch_time(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Default `ts` to the event time (or now) and synthesize a footer linking
/// back to the SNS topic the event arrived through.
pub fn apply_defaults(
    mut attachment: Attachment,
    event: &EventContext,
    links: &LinkFormatter,
) -> Attachment {
    if attachment.ts.is_none() {
        let time = event.event_time.unwrap_or_else(Utc::now);
        attachment.ts = Some(to_epoch_time(time));
    }

    if attachment.footer().is_none() {
        if let Some(raw) = event.subscription_arn.as_deref() {
            match raw.parse::<Arn>() {
                Ok(arn) => attachment.footer = Some(sns_footer(&arn, links)),
                Err(e) => warn!(error = %e, "Skipping footer"),
            }
        }
    }

    attachment
}

fn sns_footer(arn: &Arn, links: &LinkFormatter) -> String {
    let sns_link = links.format(
        &arn.topic_console_url(),
        &format!("SNS {}", visible_topic(arn.topic())),
    );
    let signin_link = links.format(&arn.signin_url(), "Sign-In");
    format!("Received via {sns_link} | {signin_link}")
}

fn visible_topic(topic: &str) -> String {
    if topic.chars().count() > MAX_TOPIC_LEN {
        let head: String = topic.chars().take(TRUNCATED_TOPIC_LEN).collect();
        format!("{head}...")
    } else {
        topic.to_string()
    }
}
