//! Calendar and event endpoints
//!
//! Creates one task, one reminder, and one note (all removed again by the
//! cleanup phase), then exercises the list and aggregate views.

use serde_json::json;

use super::{bearer, ensure_status, json_body, keys, Api};
use crate::harness::{Outcome, Step};

/// Keys the agenda view must group events under
const AGENDA_KEYS: [&str; 4] = ["hoy", "manana", "proximos7Dias", "masAdelante"];

pub fn steps(api: &Api) -> Vec<Step> {
    vec![
        create_task(api.clone()),
        create_reminder(api.clone()),
        create_note(api.clone()),
        list(api.clone()),
        agenda_view(api.clone()),
        week_view(api.clone()),
        statistics(api.clone()),
    ]
}

fn create_task(api: Api) -> Step {
    Step::new("POST /eventos/tareas", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/eventos/tareas";
            let body = json!({
                "titulo": "Tarea de Test",
                "tipo": "TAREA",
                "fecha_inicio": "2025-10-20T10:00:00.000Z",
                "fecha_fin": "2025-10-20T12:00:00.000Z",
                "estado": "PENDIENTE",
                "prioridad": "MEDIA",
            });

            let resp = api.post(path, Some(&token), &body).await?;
            ensure_status(path, &resp, 201)?;
            let data = json_body(path, &resp)?;

            let id = data["id"].clone();
            if id.is_null() {
                return Ok(Outcome::failed("create response carried no task id"));
            }
            ctx.put(keys::TASK_ID, id.clone());
            Ok(Outcome::passed_with(format!("task id {id}")))
        }
    })
}

fn create_reminder(api: Api) -> Step {
    Step::new("POST /eventos/recordatorios", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/eventos/recordatorios";
            let body = json!({
                "titulo": "Recordatorio de Test",
                "tipo": "RECORDATORIO",
                "fecha_inicio": "2025-10-21T15:00:00.000Z",
                "fecha_fin": "2025-10-21T15:30:00.000Z",
                "completado": false,
            });

            let resp = api.post(path, Some(&token), &body).await?;
            ensure_status(path, &resp, 201)?;
            let data = json_body(path, &resp)?;

            let id = data["id"].clone();
            if id.is_null() {
                return Ok(Outcome::failed("create response carried no reminder id"));
            }
            ctx.put(keys::REMINDER_ID, id.clone());
            Ok(Outcome::passed_with(format!("reminder id {id}")))
        }
    })
}

fn create_note(api: Api) -> Step {
    Step::new("POST /eventos/notas", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/eventos/notas";
            let body = json!({
                "titulo": "Nota de Test",
                "tipo": "NOTA",
                "fecha_inicio": "2025-10-22T00:00:00.000Z",
                "fecha_fin": "2025-10-22T23:59:59.999Z",
                "contenido": "Contenido de nota de prueba",
            });

            let resp = api.post(path, Some(&token), &body).await?;
            ensure_status(path, &resp, 201)?;
            let data = json_body(path, &resp)?;

            let id = data["id"].clone();
            if id.is_null() {
                return Ok(Outcome::failed("create response carried no note id"));
            }
            ctx.put(keys::NOTE_ID, id.clone());
            Ok(Outcome::passed_with(format!("note id {id}")))
        }
    })
}

fn list(api: Api) -> Step {
    Step::new("GET /eventos", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/eventos";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let count = data.as_array().map(Vec::len).unwrap_or(0);
            Ok(Outcome::passed_with(format!("total events: {count}")))
        }
    })
}

fn agenda_view(api: Api) -> Step {
    Step::new("GET /eventos/vista-agenda", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/eventos/vista-agenda";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let missing: Vec<&str> = AGENDA_KEYS
                .iter()
                .copied()
                .filter(|key| data.get(key).is_none())
                .collect();
            if !missing.is_empty() {
                return Ok(Outcome::failed(format!(
                    "agenda view missing keys: {missing:?}"
                )));
            }

            let today = data["hoy"].as_array().map(Vec::len).unwrap_or(0);
            let tomorrow = data["manana"].as_array().map(Vec::len).unwrap_or(0);
            Ok(Outcome::passed_with(format!(
                "today: {today}, tomorrow: {tomorrow}"
            )))
        }
    })
}

fn week_view(api: Api) -> Step {
    Step::new("GET /eventos/vista-semana", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/eventos/vista-semana";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            Ok(Outcome::passed())
        }
    })
}

fn statistics(api: Api) -> Step {
    Step::new("GET /eventos/estadisticas", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let path = "/eventos/estadisticas";

            let resp = api.get(path, Some(&token)).await?;
            ensure_status(path, &resp, 200)?;
            let data = json_body(path, &resp)?;

            let fields: Vec<String> = data
                .as_object()
                .map(|obj| obj.keys().cloned().collect())
                .unwrap_or_default();
            Ok(Outcome::passed_with(format!("fields: {fields:?}")))
        }
    })
}
