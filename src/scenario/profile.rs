//! Teacher profile endpoints

use serde_json::json;

use super::{bearer, ensure_status, json_body, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![get_profile(api.clone()), update_profile(api.clone())]
}

fn get_profile(api: Api) -> Step {
    Step::new("GET /docentes/me", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/docentes/me";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let name = data["nombre"].as_str().unwrap_or("n/a");
            let surname = data["apellido"].as_str().unwrap_or("n/a");
            Ok(Outcome::passed_with(format!("teacher: {name} {surname}")))
        }
    })
}

fn update_profile(api: Api) -> Step {
    Step::new("PATCH /docentes/me", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/docentes/me";
            let body = json!({ "bio": "Bio actualizada en test automatizado" });

            let resp = api.patch(path, Some(&token), Some(&body)).await?;
            ensure_status(path, &resp, 200)?;
            Ok(Outcome::passed())
        }
    })
}
