//! Class endpoints
//!
//! Creation schedules the class two days out so the backend's "no classes in
//! the past" validation never trips; the created id feeds the detail, cancel,
//! attendance, and cleanup steps.

use chrono::{Duration, Utc};
use serde_json::json;

use super::{bearer, ensure_status, json_body, keys, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![
        my_classes(api.clone()),
        create(api.clone()),
        detail(api.clone()),
        cancel(api.clone()),
    ]
}

fn my_classes(api: Api) -> Step {
    Step::new("GET /clases/docente/mis-clases", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/clases/docente/mis-clases";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let count = data.as_array().map(Vec::len).unwrap_or(0);
            Ok(Outcome::passed_with(format!("my classes: {count}")))
        }
    })
}

fn create(api: Api) -> Step {
    Step::new("POST /clases (create class)", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let curricular_path = ctx.require(keys::PATH_ID)?;
            let teacher = ctx.require(keys::TEACHER_ID)?;

            let starts = Utc::now() + Duration::days(2);
            let ends = starts + Duration::hours(1);

            let path = "/clases";
            let body = json!({
                "titulo": "Clase de Test Automatizada",
                "descripcion": "Clase creada por test automatizado",
                "ruta_curricular_id": curricular_path,
                "docente_id": teacher,
                "fecha_inicio": starts.to_rfc3339(),
                "fecha_fin": ends.to_rfc3339(),
                "cupo_maximo": 10,
                "modalidad": "PRESENCIAL",
            });

            let resp = api.post(path, Some(&token), &body).await?;
            ensure_status(path, &resp, 201)?;
            let data = json_body(path, &resp)?;

            let id = data["id"].clone();
            if id.is_null() {
                return Ok(Outcome::failed("create response carried no class id"));
            }
            ctx.put(keys::CLASS_ID, id.clone());
            Ok(Outcome::passed_with(format!("class created with id {id}")))
        }
    })
}

fn detail(api: Api) -> Step {
    Step::new("GET /clases/:id", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let id = ctx.require_str(keys::CLASS_ID)?;
            let path = format!("/clases/{id}");

            let resp = api.get(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            let data = json_body(&path, &resp)?;

            let title = data["titulo"].as_str().unwrap_or("n/a");
            Ok(Outcome::passed_with(format!("class: {title}")))
        }
    })
}

fn cancel(api: Api) -> Step {
    Step::new("PATCH /clases/:id/cancelar", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let id = ctx.require_str(keys::CLASS_ID)?;
            let path = format!("/clases/{id}/cancelar");

            let resp = api.patch(&path, Some(&token), None).await?;
            ensure_status(&path, &resp, 200)?;
            Ok(Outcome::passed())
        }
    })
}
