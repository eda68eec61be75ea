//! Student roster endpoints
//!
//! The list step remembers the first student's id; later steps (detail,
//! attendance, gamification) depend on it and fail with a missing-dependency
//! reason when the roster was empty.

use super::{bearer, ensure_status, json_body, keys, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![list(api.clone()), detail(api.clone())]
}

fn list(api: Api) -> Step {
    Step::new("GET /estudiantes", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/estudiantes";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let students = data.as_array().cloned().unwrap_or_default();
            if let Some(first) = students.first() {
                ctx.put(keys::STUDENT_ID, first["id"].clone());
            }
            Ok(Outcome::passed_with(format!(
                "{} students visible",
                students.len()
            )))
        }
    })
}

fn detail(api: Api) -> Step {
    Step::new("GET /estudiantes/:id", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let id = ctx.require_str(keys::STUDENT_ID)?;
            let path = format!("/estudiantes/{id}");

            let resp = api.get(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            let data = json_body(&path, &resp)?;

            let name = data["nombre"].as_str().unwrap_or("n/a");
            Ok(Outcome::passed_with(format!("student: {name}")))
        }
    })
}
