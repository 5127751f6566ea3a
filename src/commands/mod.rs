pub mod init;
pub mod render;
pub mod send;

use std::io::Read;

use chrono::{DateTime, Utc};

use crate::cli::MessageArgs;
use crate::defaults::{apply_defaults, EventContext};
use crate::error::{NotifyError, Result};
use crate::links::LinkFormatter;
use crate::render::CardRenderer;
use crate::types::{Attachment, Message};

/// Read the attachment named by `args`, fill defaults, and render it.
pub fn load_message(args: &MessageArgs, links: LinkFormatter) -> Result<Message> {
    let raw = read_input(args)?;
    let attachment: Attachment = serde_json::from_str(&raw)?;

    let event = EventContext {
        event_time: args.event_time.as_deref().map(parse_event_time).transpose()?,
        subscription_arn: args.subscription_arn.clone(),
    };
    let attachment = apply_defaults(attachment, &event, &links);

    Ok(CardRenderer::new(links).render(&attachment))
}

fn read_input(args: &MessageArgs) -> Result<String> {
    match args.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).map_err(|e| NotifyError::AttachmentRead {
                path: path.display().to_string(),
                source: e,
            })
        }
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|e| NotifyError::AttachmentRead {
                    path: "<stdin>".to_string(),
                    source: e,
                })?;
            Ok(raw)
        }
    }
}

fn parse_event_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| NotifyError::InvalidEventTime {
            value: value.to_string(),
            source: e,
        })
}
