use tracing::debug;
use crate::models::admin_message::render_ban_report;
use crate::models::events::IncomingMessage;
use crate::models::keyboard::report_keyboard;
use crate::services::ModerationContext;
use crate::utils::errors::Result;

/// Post a ban report with "change ban" and "info" buttons to the admin chat,
/// returning the id of the admin message
pub async fn report_ban(ctx: &ModerationContext, msg: &IncomingMessage) -> Result<i32> {
    let user_label = msg.user_label();
    debug!(user = %user_label, admin_chat_id = ctx.admin_chat_id, "Reporting ban to admin chat");

    let text = render_ban_report(&user_label, msg.user_id, &msg.text);
    let keyboard = report_keyboard(msg.user_id, msg.message_id);

    ctx.transport
        .send_message(ctx.admin_chat_id, &text, Some(&keyboard))
        .await
        .map_err(|e| e.context("failed to send admin message"))
}
