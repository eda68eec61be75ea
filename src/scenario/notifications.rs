//! Notification endpoints
//!
//! The backend has shipped without this module before; a 404 on the list is
//! reported as its own reason so the operator can tell "not deployed" from
//! an ordinary failure.

use super::{bearer, ensure_status, json_body, keys, unexpected, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![list(api.clone()), mark_read(api.clone())]
}

fn list(api: Api) -> Step {
    Step::new("GET /notificaciones", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/notificaciones";

            let resp = api.get(path, Some(&token)).await?;
            if resp.status == 404 {
                return Ok(Outcome::failed("endpoint not implemented (HTTP 404)"));
            }
            if resp.status != 200 {
                return Err(unexpected(path, &resp));
            }
            let data = json_body(path, &resp)?;

            let notifications = data.as_array().cloned().unwrap_or_default();
            if let Some(first) = notifications.first() {
                ctx.put(keys::NOTIFICATION_ID, first["id"].clone());
            }
            Ok(Outcome::passed_with(format!(
                "notifications: {}",
                notifications.len()
            )))
        }
    })
}

fn mark_read(api: Api) -> Step {
    Step::new("PATCH /notificaciones/:id/leida", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let id = ctx.require_str(keys::NOTIFICATION_ID)?;
            let path = format!("/notificaciones/{id}/leida");

            let resp = api.patch(&path, Some(&token), None).await?;
            ensure_status(&path, &resp, 200)?;
            Ok(Outcome::passed())
        }
    })
}
