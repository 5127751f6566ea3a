//! Amazon Resource Name parsing, enough to locate an SNS topic.

use std::fmt;
use std::str::FromStr;

use crate::error::NotifyError;

const CONSOLE_BASE: &str = "https://console.aws.amazon.com";

/// `arn:partition:service:region:account:resource`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account: String,
    /// Everything after the account, colons included.
    pub resource: String,
}

impl FromStr for Arn {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(6, ':');
        let invalid = || NotifyError::InvalidArn(s.to_string());

        if parts.next() != Some("arn") {
            return Err(invalid());
        }
        let mut next = || parts.next().map(str::to_string).ok_or_else(invalid);
        let arn = Arn {
            partition: next()?,
            service: next()?,
            region: next()?,
            account: next()?,
            resource: next()?,
        };

        if arn.partition.is_empty() || arn.service.is_empty() || arn.resource.is_empty() {
            return Err(invalid());
        }
        Ok(arn)
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account, self.resource
        )
    }
}

impl Arn {
    /// SNS topic name; for a subscription ARN the trailing subscription id is dropped.
    pub fn topic(&self) -> &str {
        self.resource.split(':').next().unwrap_or_default()
    }

    /// Console page for the topic.
    pub fn topic_console_url(&self) -> String {
        format!(
            "{CONSOLE_BASE}/sns/v2/home?region={region}#/topics/arn:aws:sns:{region}:{account}:{topic}",
            region = self.region,
            account = self.account,
            topic = self.topic(),
        )
    }

    /// Account-specific console sign-in page.
    pub fn signin_url(&self) -> String {
        format!(
            "https://{}.signin.aws.amazon.com/console/sns?region={}",
            self.account, self.region
        )
    }
}
