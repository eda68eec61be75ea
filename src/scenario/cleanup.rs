//! Cleanup steps
//!
//! Remove every record the run created so repeated runs don't litter the
//! target environment. Each step checks for its id before anything else:
//! when the producing step never ran (gate failure, create failure) the
//! step is a successful no-op rather than a cascading failure.

use super::{bearer, ensure_status, keys, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![
        delete_event("DELETE /eventos/:id (test task)", keys::TASK_ID, api.clone()),
        delete_event(
            "DELETE /eventos/:id (test reminder)",
            keys::REMINDER_ID,
            api.clone(),
        ),
        delete_event("DELETE /eventos/:id (test note)", keys::NOTE_ID, api.clone()),
        delete_class(api.clone()),
    ]
}

fn delete_event(name: &'static str, key: &'static str, api: Api) -> Step {
    Step::new(name, move |ctx| {
        let api = api.clone();
        async move {
            let Some(id) = ctx.get_str(key) else {
                return Ok(Outcome::passed_with("nothing to remove"));
            };
            let token = bearer(&ctx)?;
            let path = format!("/eventos/{id}");

            let resp = api.delete(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            Ok(Outcome::passed())
        }
    })
}

fn delete_class(api: Api) -> Step {
    Step::new("DELETE /clases/:id (test class)", move |ctx| {
        let api = api.clone();
        async move {
            let Some(id) = ctx.get_str(keys::CLASS_ID) else {
                return Ok(Outcome::passed_with("nothing to remove"));
            };
            let token = bearer(&ctx)?;
            let path = format!("/clases/{id}");

            let resp = api.delete(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            Ok(Outcome::passed())
        }
    })
}
