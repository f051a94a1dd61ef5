use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    canonical_section_key, CourseChanges, CreateAchievementRequest, CreateActivityRequest,
    CreateCourseRequest, CreateScoreRequest, CreateTargetRequest, DeletedResponse, ErrorResponse,
    NewAchievement, NewCourse, NewExtracurricular, NewScore, NewTarget, PortfolioResponse,
    ProfileChanges, UpdateCourseRequest, UpdateProfileRequest, UserQuery,
};
use crate::routes::{resolve_user, supabase_error, validation_error, AppState};
use crate::services::SupabaseError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/portfolio", web::get().to(get_portfolio))
        .route("/portfolio/refresh", web::post().to(refresh_portfolio))
        .route("/profile", web::patch().to(update_profile))
        .route("/courses", web::post().to(create_course))
        .route("/courses/{id}", web::patch().to(update_course))
        .route("/courses/{id}", web::delete().to(delete_course))
        .route("/scores", web::post().to(create_score))
        .route("/scores/{id}", web::delete().to(delete_score))
        .route("/targets", web::post().to(create_target))
        .route("/targets/{id}", web::delete().to(delete_target))
        .route("/activities", web::post().to(create_activity))
        .route("/activities/{id}", web::delete().to(delete_activity))
        .route("/achievements", web::post().to(create_achievement))
        .route("/achievements/{id}", web::delete().to(delete_achievement));
}

/// Raw aggregated portfolio endpoint
///
/// GET /api/v1/portfolio?userId={uuid}
async fn get_portfolio(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
    http_req: HttpRequest,
) -> HttpResponse {
    let user_id = match resolve_user(&http_req, query.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.portfolio.snapshot(user_id).await {
        Ok(snapshot) => HttpResponse::Ok().json(PortfolioResponse { user_id, snapshot }),
        Err(e) => supabase_error(e, "Failed to aggregate portfolio"),
    }
}

/// Force a re-aggregation, bypassing the cached snapshot
///
/// POST /api/v1/portfolio/refresh?userId={uuid}
async fn refresh_portfolio(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
    http_req: HttpRequest,
) -> HttpResponse {
    let user_id = match resolve_user(&http_req, query.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    tracing::info!("Refreshing portfolio for user: {}", user_id);

    match state.portfolio.refresh(user_id).await {
        Ok(snapshot) => HttpResponse::Ok().json(PortfolioResponse { user_id, snapshot }),
        Err(e) => supabase_error(e, "Failed to refresh portfolio"),
    }
}

/// Onboarding profile update (name, intended major, preset GPA)
async fn update_profile(
    state: web::Data<AppState>,
    req: web::Json<UpdateProfileRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let user_id = match resolve_user(&http_req, req.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let changes = ProfileChanges {
        name: req.name.clone(),
        intended_major: req.intended_major.clone(),
        current_gpa: req.current_gpa,
    };

    match state.supabase.update_profile(user_id, &changes).await {
        Ok(profile) => {
            state.portfolio.invalidate(user_id).await;
            HttpResponse::Ok().json(profile)
        }
        Err(e) => supabase_error(e, "Failed to update profile"),
    }
}

async fn create_course(
    state: web::Data<AppState>,
    req: web::Json<CreateCourseRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let user_id = match resolve_user(&http_req, req.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let row = NewCourse {
        user_id,
        name: req.name.clone(),
        grade: req.grade,
        year: req.year,
        semester: req.semester,
    };

    match state.supabase.create_course(&row).await {
        Ok(course) => {
            state.portfolio.invalidate(user_id).await;
            HttpResponse::Created().json(course)
        }
        Err(e) => supabase_error(e, "Failed to create course"),
    }
}

async fn update_course(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCourseRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let user_id = match resolve_user(&http_req, req.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let changes = CourseChanges {
        name: req.name.clone(),
        grade: req.grade,
        year: req.year,
        semester: req.semester,
    };

    match state.supabase.update_course(path.into_inner(), &changes).await {
        Ok(course) => {
            state.portfolio.invalidate(user_id).await;
            HttpResponse::Ok().json(course)
        }
        Err(e) => supabase_error(e, "Failed to update course"),
    }
}

async fn delete_course(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<UserQuery>,
    http_req: HttpRequest,
) -> HttpResponse {
    let user_id = match resolve_user(&http_req, query.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let id = path.into_inner();
    let result = state.supabase.delete_course(id).await;
    finish_delete(&state, user_id, id, "course", result).await
}

async fn create_score(
    state: web::Data<AppState>,
    req: web::Json<CreateScoreRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let user_id = match resolve_user(&http_req, req.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    // Canonicalize section keys on the way in so stored data stays uniform
    let section_scores = req.section_scores.clone().map(|sections| {
        sections
            .into_iter()
            .map(|(key, value)| (canonical_section_key(&key), value))
            .collect()
    });

    let row = NewScore {
        user_id,
        test_type: req.test_type,
        score: req.score,
        section_scores,
        date_taken: req.date_taken,
    };

    match state.supabase.create_score(&row).await {
        Ok(score) => {
            state.portfolio.invalidate(user_id).await;
            HttpResponse::Created().json(score)
        }
        Err(e) => supabase_error(e, "Failed to create score"),
    }
}

async fn delete_score(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<UserQuery>,
    http_req: HttpRequest,
) -> HttpResponse {
    let user_id = match resolve_user(&http_req, query.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let id = path.into_inner();
    let result = state.supabase.delete_score(id).await;
    finish_delete(&state, user_id, id, "score", result).await
}

/// Add a target university; duplicate (user, university) pairs are rejected
async fn create_target(
    state: web::Data<AppState>,
    req: web::Json<CreateTargetRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let user_id = match resolve_user(&http_req, req.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state
        .supabase
        .targets_for_university(user_id, req.university_id)
        .await
    {
        Ok(existing) if !existing.is_empty() => {
            return HttpResponse::Conflict().json(ErrorResponse {
                error: "Duplicate target".to_string(),
                message: format!("University {} is already targeted", req.university_id),
                status_code: 409,
            });
        }
        Ok(_) => {}
        Err(e) => return supabase_error(e, "Failed to check existing targets"),
    }

    let row = NewTarget {
        user_id,
        university_id: req.university_id,
        reason_for_interest: req.reason_for_interest.clone(),
    };

    match state.supabase.create_target(&row).await {
        Ok(target) => {
            state.portfolio.invalidate(user_id).await;
            HttpResponse::Created().json(target)
        }
        Err(e) => supabase_error(e, "Failed to create target"),
    }
}

async fn delete_target(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<UserQuery>,
    http_req: HttpRequest,
) -> HttpResponse {
    let user_id = match resolve_user(&http_req, query.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let id = path.into_inner();
    let result = state.supabase.delete_target(id).await;
    finish_delete(&state, user_id, id, "target", result).await
}

async fn create_activity(
    state: web::Data<AppState>,
    req: web::Json<CreateActivityRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let user_id = match resolve_user(&http_req, req.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let row = NewExtracurricular {
        user_id,
        title: req.title.clone(),
        description: req.description.clone(),
        level: req.level.clone(),
        hours_per_week: req.hours_per_week,
        years_participated: req.years_participated,
    };

    match state.supabase.create_extracurricular(&row).await {
        Ok(activity) => {
            state.portfolio.invalidate(user_id).await;
            HttpResponse::Created().json(activity)
        }
        Err(e) => supabase_error(e, "Failed to create activity"),
    }
}

async fn delete_activity(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<UserQuery>,
    http_req: HttpRequest,
) -> HttpResponse {
    let user_id = match resolve_user(&http_req, query.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let id = path.into_inner();
    let result = state.supabase.delete_extracurricular(id).await;
    finish_delete(&state, user_id, id, "activity", result).await
}

async fn create_achievement(
    state: web::Data<AppState>,
    req: web::Json<CreateAchievementRequest>,
    http_req: HttpRequest,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let user_id = match resolve_user(&http_req, req.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let row = NewAchievement {
        user_id,
        title: req.title.clone(),
        description: req.description.clone(),
        category: req.category.clone(),
        awarded_by: req.awarded_by.clone(),
        date_awarded: req.date_awarded,
    };

    match state.supabase.create_achievement(&row).await {
        Ok(achievement) => {
            state.portfolio.invalidate(user_id).await;
            HttpResponse::Created().json(achievement)
        }
        Err(e) => supabase_error(e, "Failed to create achievement"),
    }
}

async fn delete_achievement(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<UserQuery>,
    http_req: HttpRequest,
) -> HttpResponse {
    let user_id = match resolve_user(&http_req, query.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let id = path.into_inner();
    let result = state.supabase.delete_achievement(id).await;
    finish_delete(&state, user_id, id, "achievement", result).await
}

/// Shared tail for delete endpoints: 404 when nothing matched, cache
/// invalidation and an acknowledgment otherwise.
async fn finish_delete(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    entity: &str,
    result: Result<bool, SupabaseError>,
) -> HttpResponse {
    match result {
        Ok(true) => {
            state.portfolio.invalidate(user_id).await;
            HttpResponse::Ok().json(DeletedResponse { success: true, id })
        }
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("{} not found", entity),
            message: format!("No {} with id {}", entity, id),
            status_code: 404,
        }),
        Err(e) => supabase_error(e, &format!("Failed to delete {}", entity)),
    }
}
