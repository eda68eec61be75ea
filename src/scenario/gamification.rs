//! Gamification endpoints

use serde_json::json;

use super::{bearer, ensure_status, json_body, keys, Api};
use crate::harness::{Outcome, Step};

pub fn steps(api: &Api) -> Vec<Step> {
    vec![
        student_profile(api.clone()),
        award_experience(api.clone()),
        achievements(api.clone()),
    ]
}

fn student_profile(api: Api) -> Step {
    Step::new("GET /gamificacion/perfil/:studentId", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let student_id = ctx.require_str(keys::STUDENT_ID)?;
            let path = format!("/gamificacion/perfil/{student_id}");

            let resp = api.get(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            let data = json_body(&path, &resp)?;

            Ok(Outcome::passed_with(format!(
                "level: {}, xp: {}",
                data["nivel"], data["experiencia_total"]
            )))
        }
    })
}

fn award_experience(api: Api) -> Step {
    Step::new("POST /gamificacion/experiencia", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let student_id = ctx.require(keys::STUDENT_ID)?;

            let path = "/gamificacion/experiencia";
            let body = json!({
                "estudiante_id": student_id,
                "puntos": 50,
                "razon": "Test automatizado",
                "tipo": "CLASE_COMPLETADA",
            });

            let resp = api.post(path, Some(&token), &body).await?;
            ensure_status(path, &resp, 201)?;
            Ok(Outcome::passed())
        }
    })
}

fn achievements(api: Api) -> Step {
    Step::new("GET /gamificacion/logros/:studentId", move |ctx| {
        let api = api.clone();
        async move {
            let token = bearer(&ctx)?;
            let student_id = ctx.require_str(keys::STUDENT_ID)?;
            let path = format!("/gamificacion/logros/{student_id}");

            let resp = api.get(&path, Some(&token)).await?;
            ensure_status(&path, &resp, 200)?;
            let data = json_body(&path, &resp)?;

            let count = data.as_array().map(Vec::len).unwrap_or(0);
            Ok(Outcome::passed_with(format!("achievements: {count}")))
        }
    })
}
