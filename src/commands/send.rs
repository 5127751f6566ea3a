use crate::cli::MessageArgs;
use crate::error::Result;
use crate::links::LinkFormatter;
use crate::output;
use crate::secret::Decryptor;
use crate::service::NotificationService;

pub async fn run<D: Decryptor>(
    service: &NotificationService<D>,
    args: &MessageArgs,
    links: LinkFormatter,
) -> Result<()> {
    let message = super::load_message(args, links)?;
    let result = service.post_message(&message).await?;

    output::print_delivery(&result);
    if !output::is_json_output() {
        output::print_message("Message posted to Teams.");
    }

    Ok(())
}
