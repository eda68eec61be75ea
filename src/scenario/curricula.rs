//! Curricular path endpoints

use super::{bearer, ensure_status, json_body, keys, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![list(api.clone()), detail(api.clone())]
}

fn list(api: Api) -> Step {
    Step::new("GET /admin/rutas-curriculares", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/admin/rutas-curriculares";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let paths = data.as_array().cloned().unwrap_or_default();
            if let Some(first) = paths.first() {
                ctx.put(keys::PATH_ID, first["id"].clone());
            }
            Ok(Outcome::passed_with(format!(
                "{} curricular paths available",
                paths.len()
            )))
        }
    })
}

fn detail(api: Api) -> Step {
    Step::new("GET /admin/rutas-curriculares/:id", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let id = ctx.require_str(keys::PATH_ID)?;
            let path = format!("/admin/rutas-curriculares/{id}");

            let resp = api.get(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            let data = json_body(&path, &resp)?;

            let name = data["nombre"].as_str().unwrap_or("n/a");
            Ok(Outcome::passed_with(format!("curricular path: {name}")))
        }
    })
}
