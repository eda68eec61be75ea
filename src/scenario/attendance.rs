//! Attendance endpoints

use serde_json::json;

use super::{bearer, ensure_status, json_body, keys, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![for_class(api.clone()), register(api.clone()), amend(api.clone())]
}

fn for_class(api: Api) -> Step {
    Step::new("GET /asistencia/clase/:id", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let class_id = ctx.require_str(keys::CLASS_ID)?;
            let path = format!("/asistencia/clase/{class_id}");

            let resp = api.get(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            let data = json_body(&path, &resp)?;

            let count = data.as_array().map(Vec::len).unwrap_or(0);
            Ok(Outcome::passed_with(format!("attendance records: {count}")))
        }
    })
}

fn register(api: Api) -> Step {
    Step::new("POST /asistencia (register attendance)", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let class_id = ctx.require(keys::CLASS_ID)?;
            let student_id = ctx.require(keys::STUDENT_ID)?;

            let path = "/asistencia";
            let body = json!({
                "clase_id": class_id,
                "estudiante_id": student_id,
                "presente": true,
                "observaciones": "Test automatizado",
            });

            let resp = api.post(path, Some(&token), &body).await?;
            ensure_status(path, &resp, 201)?;
            let data = json_body(path, &resp)?;

            let id = data["id"].clone();
            if id.is_null() {
                return Ok(Outcome::failed("register response carried no attendance id"));
            }
            ctx.put(keys::ATTENDANCE_ID, id.clone());
            Ok(Outcome::passed_with(format!("attendance recorded, id {id}")))
        }
    })
}

fn amend(api: Api) -> Step {
    Step::new("PATCH /asistencia/:id", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let id = ctx.require_str(keys::ATTENDANCE_ID)?;
            let path = format!("/asistencia/{id}");
            let body = json!({ "observaciones": "Actualizado por test" });

            let resp = api.patch(&path, Some(&token), Some(&body)).await?;
            ensure_status(&path, &resp, 200)?;
            Ok(Outcome::passed())
        }
    })
}
