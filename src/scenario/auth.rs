//! Authentication
//!
//! The login step is the run's gate: without a session token every other
//! endpoint would fail with the same uninformative 401, so a failed login
//! skips the rest of the main phase instead of polluting the failure count.

use serde_json::json;

use super::{ensure_status, json_body, keys, Api};
use crate::common::Credentials;
use crate::harness::{Outcome, Step};

pub fn login(api: Api, credentials: Credentials) -> Step {
    Step::new("POST /auth/login (teacher login)", move |ctx| {
        let api = api.clone();
        let credentials = credentials.clone();
        async move {
            let path = "/auth/login";
            let body = json!({
                "email": credentials.email,
                "password": credentials.password,
            });

            let resp = api.post(path, None, &body).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let token = match data["access_token"].as_str() {
                Some(token) => token.to_string(),
                None => return Ok(Outcome::failed("login response carried no access_token")),
            };
            let user_id = data["user"]["id"].clone();
            if user_id.is_null() {
                return Ok(Outcome::failed("login response carried no user id"));
            }

            ctx.put(keys::TOKEN, token);
            ctx.put(keys::USER_ID, user_id.clone());
            ctx.put(keys::TEACHER_ID, user_id.clone());

            Ok(Outcome::passed_with(format!(
                "token acquired, user id {user_id}"
            )))
        }
    })
    .gate()
}
