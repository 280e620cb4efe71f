use crate::error::{Result, WheelError};

use super::{Message, MessageTable, RandomSource};

/// Draws one message with probability proportional to its weight.
///
/// The draw `r` lands in `[0, total)`. Walking the table in order, the first
/// message whose cumulative upper bound reaches `r` wins, so a draw exactly on
/// a boundary goes to the earlier message. If rounding pushes `r` past every
/// bound the last message is returned.
pub fn sample<'a>(table: &'a MessageTable, rng: &mut dyn RandomSource) -> Result<&'a Message> {
    let total = table.total_weight();
    if table.is_empty() || !total.is_finite() || total <= 0.0 {
        return Err(WheelError::config("cannot sample from an invalid message table"));
    }

    let r = rng.uniform(total);

    let mut acc = 0.0;
    for message in table.messages() {
        if acc + message.weight >= r {
            return Ok(message);
        }
        acc += message.weight;
    }

    table
        .messages()
        .last()
        .ok_or(WheelError::SamplingExhausted)
}
