//! Product catalog endpoints

use super::{bearer, ensure_status, json_body, keys, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![list(api.clone()), detail(api.clone())]
}

fn list(api: Api) -> Step {
    Step::new("GET /productos", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/productos";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let products = data.as_array().cloned().unwrap_or_default();
            if let Some(first) = products.first() {
                ctx.put(keys::PRODUCT_ID, first["id"].clone());
            }
            Ok(Outcome::passed_with(format!(
                "{} products available",
                products.len()
            )))
        }
    })
}

fn detail(api: Api) -> Step {
    Step::new("GET /productos/:id", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let id = ctx.require_str(keys::PRODUCT_ID)?;
            let path = format!("/productos/{id}");

            let resp = api.get(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            let data = json_body(&path, &resp)?;

            let name = data["nombre"].as_str().unwrap_or("n/a");
            Ok(Outcome::passed_with(format!("product: {name}")))
        }
    })
}
