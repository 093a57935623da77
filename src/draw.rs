//! Client for the remote draw service.
//!
//! The service answers JSON of the shape `{ status, winner | winners | data,
//! user?, message? }` where `status` is a success marker (`SUCCESS`/`success`) or
//! anything else on rejection. The envelope is parsed leniently because different
//! draw endpoints nest the winner record differently; anything other than a
//! success marker surfaces the server message when one is present. One request,
//! one answer; retrying is a caller decision.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::constants::draw::GENERIC_FAILURE_MESSAGE;
use crate::errors::SiftError;

/// Body of a parameterized draw request.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DrawRequest {
    /// Prize amount for this draw.
    pub amount: u64,
    /// First eligible ticket date.
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    /// Last eligible ticket date.
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

/// Winner record extracted from a successful draw response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawWinner {
    /// Winning ticket number.
    pub ticket_number: String,
    /// Winner's phone number, when the service includes one.
    pub phone_number: Option<String>,
    /// Timestamp of the draw as reported by the service.
    pub drawn_at: Option<String>,
    /// Prize amount as reported by the service.
    pub amount: Option<String>,
}

/// Run a simple draw (GET).
pub fn draw_winner(endpoint: &str) -> Result<DrawWinner, SiftError> {
    info!("[numsift:draw] requesting draw from {endpoint}");
    let response = ureq::get(endpoint)
        .call()
        .map_err(|err| SiftError::Network(err.to_string()))?;
    let body = response
        .into_body()
        .read_to_string()
        .map_err(|err| SiftError::Network(format!("failed reading draw response: {err}")))?;
    parse_draw_response(&body)
}

/// Run a parameterized draw (POST with a JSON body).
pub fn draw_winner_for(endpoint: &str, request: &DrawRequest) -> Result<DrawWinner, SiftError> {
    info!(
        "[numsift:draw] requesting {} draw from {endpoint}",
        request.amount
    );
    let response = ureq::post(endpoint)
        .send_json(request)
        .map_err(|err| SiftError::Network(err.to_string()))?;
    let body = response
        .into_body()
        .read_to_string()
        .map_err(|err| SiftError::Network(format!("failed reading draw response: {err}")))?;
    parse_draw_response(&body)
}

fn parse_draw_response(body: &str) -> Result<DrawWinner, SiftError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|err| SiftError::Network(format!("malformed draw response: {err}")))?;

    let status = json.get("status").and_then(Value::as_str).unwrap_or("");
    if !status.eq_ignore_ascii_case("success") {
        return Err(SiftError::RemoteRejection {
            message: rejection_message(&json),
        });
    }

    let Some(winner) = winner_value(&json) else {
        return Err(SiftError::RemoteRejection {
            message: rejection_message(&json),
        });
    };

    let ticket_number = string_field(winner, "ticketNumber")
        .or_else(|| json.get("data").and_then(|data| string_field(data, "ticketNumber")));
    let Some(ticket_number) = ticket_number else {
        return Err(SiftError::RemoteRejection {
            message: rejection_message(&json),
        });
    };

    let phone_number = string_field(winner, "phoneNumber")
        .or_else(|| json.get("user").and_then(|user| string_field(user, "phoneNumber")));

    Ok(DrawWinner {
        ticket_number,
        phone_number,
        drawn_at: string_field(winner, "drawnAt"),
        amount: string_field(winner, "amount"),
    })
}

/// The winner record may sit under `winner`, be the head of `winners`, or sit
/// under `data`.
fn winner_value(json: &Value) -> Option<&Value> {
    json.get("winner")
        .or_else(|| json.get("winners").and_then(|winners| winners.get(0)))
        .or_else(|| json.get("data"))
        .filter(|value| value.is_object())
}

fn rejection_message(json: &Value) -> String {
    json.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
