use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;

use crate::remote::{PlaybackAction, PowerState, Remote, RemoteError};

#[derive(OpenApi)]
#[openapi(
    info(description = "tvbridge API"),
    paths(
        set_power,
        get_power,
        set_volume,
        mute,
        unmute,
        get_volume,
        get_apps,
        launch_app,
        press_home,
        playback,
        set_input,
        get_input,
        get_all_inputs,
        set_channel_by_number,
        set_channel_by_name,
        get_all_channels,
    )
)]
pub struct ApiDoc;

pub async fn serve(addr: SocketAddr, auth_key: String, remote: Arc<Remote>) -> anyhow::Result<()> {
    let router = Router::new()
        .route("/power/{status}", post(set_power))
        .route("/power", get(get_power))
        .route("/volume/set/{level}", post(set_volume))
        .route("/volume/mute", post(mute))
        .route("/volume/unmute", post(unmute))
        .route("/volume", get(get_volume))
        .route("/apps", get(get_apps))
        .route("/apps/launch/{name}", post(launch_app))
        .route("/home", post(press_home))
        .route("/playback/{action}", post(playback))
        .route("/input/set/{name}", post(set_input))
        .route("/input", get(get_input))
        .route("/input/all", get(get_all_inputs))
        .route("/channel/number/{number}", post(set_channel_by_number))
        .route("/channel/name/{name}", post(set_channel_by_name))
        .route("/channel/all", get(get_all_channels))
        .layer(middleware::from_fn_with_state(
            Arc::new(auth_key),
            require_auth,
        ))
        .with_state(remote);

    let router = router.route("/openapi.json", get(async || Json(ApiDoc::openapi())));

    let listener = TcpListener::bind(&addr).await?;

    info!("Listening on http://{}", &addr);

    axum::serve(listener, router).await?;

    Ok(())
}

async fn require_auth(
    State(key): State<Arc<String>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get("X-Auth-Key")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == key.as_str());

    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    next.run(request).await
}

impl IntoResponse for RemoteError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Device(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(model::Error { error: message })).into_response()
    }
}

mod model {
    use serde::Serialize;
    use utoipa::ToSchema;

    use crate::catalog::Candidate;
    use crate::channel::{ChannelCandidate, ChannelKind};
    use crate::remote::VolumeStatus;

    #[derive(Serialize, ToSchema)]
    pub struct Error {
        pub error: String,
    }

    #[derive(Serialize, ToSchema)]
    pub struct Power {
        pub is_awake: bool,
    }

    #[derive(Serialize, ToSchema)]
    pub struct Volume {
        pub muted: bool,
        pub level: i32,
    }

    impl From<VolumeStatus> for Volume {
        fn from(value: VolumeStatus) -> Self {
            Self {
                muted: value.muted,
                level: value.level,
            }
        }
    }

    #[derive(Serialize, ToSchema)]
    pub struct AppList {
        pub apps: Vec<String>,
    }

    #[derive(Serialize, ToSchema)]
    pub struct LaunchedApp {
        pub app_name: String,
    }

    #[derive(Serialize, ToSchema)]
    pub struct Input {
        pub name: String,
        pub custom_label: Option<String>,
    }

    impl From<Candidate> for Input {
        fn from(value: Candidate) -> Self {
            Self {
                name: value.name,
                custom_label: value.custom_label,
            }
        }
    }

    #[derive(Serialize, ToSchema)]
    pub struct InputList {
        pub inputs: Vec<Input>,
    }

    #[derive(Serialize, ToSchema)]
    pub struct PlayingInput {
        pub input_name: Option<String>,
    }

    #[derive(Serialize, ToSchema)]
    pub struct Channel {
        pub name: Option<String>,
        pub number: String,
        pub kind: &'static str,
    }

    impl From<ChannelCandidate> for Channel {
        fn from(value: ChannelCandidate) -> Self {
            Self {
                name: value.name,
                number: value.info.channel_full,
                kind: match value.kind {
                    ChannelKind::Analog => "analog",
                    ChannelKind::Digital => "digital",
                },
            }
        }
    }
}

#[utoipa::path(
    post,
    path = "/power/{status}",
    params(("status" = String, Path)),
    responses((status = 200), (status = BAD_REQUEST), (status = INTERNAL_SERVER_ERROR)),
)]
async fn set_power(
    State(remote): State<Arc<Remote>>,
    Path(status): Path<String>,
) -> Result<(), RemoteError> {
    remote.set_power(PowerState::parse(&status)?).await
}

#[utoipa::path(
    get,
    path = "/power",
    responses((status = 200, body = model::Power)),
)]
async fn get_power(State(remote): State<Arc<Remote>>) -> Result<Json<model::Power>, RemoteError> {
    let is_awake = remote.power_status().await?;

    Ok(Json(model::Power { is_awake }))
}

#[utoipa::path(
    post,
    path = "/volume/set/{level}",
    params(("level" = String, Path)),
    responses((status = 200), (status = BAD_REQUEST)),
)]
async fn set_volume(
    State(remote): State<Arc<Remote>>,
    Path(level): Path<String>,
) -> Result<(), RemoteError> {
    remote.set_volume(&level).await
}

#[utoipa::path(
    post,
    path = "/volume/mute",
    responses((status = 200)),
)]
async fn mute(State(remote): State<Arc<Remote>>) -> Result<(), RemoteError> {
    remote.set_mute(true).await
}

#[utoipa::path(
    post,
    path = "/volume/unmute",
    responses((status = 200)),
)]
async fn unmute(State(remote): State<Arc<Remote>>) -> Result<(), RemoteError> {
    remote.set_mute(false).await
}

#[utoipa::path(
    get,
    path = "/volume",
    responses((status = 200, body = model::Volume)),
)]
async fn get_volume(State(remote): State<Arc<Remote>>) -> Result<Json<model::Volume>, RemoteError> {
    let volume = remote.volume().await?;

    Ok(Json(volume.into()))
}

#[utoipa::path(
    get,
    path = "/apps",
    responses((status = 200, body = model::AppList)),
)]
async fn get_apps(State(remote): State<Arc<Remote>>) -> Result<Json<model::AppList>, RemoteError> {
    let apps = remote.list_apps().await?;

    Ok(Json(model::AppList { apps }))
}

#[utoipa::path(
    post,
    path = "/apps/launch/{name}",
    params(("name" = String, Path)),
    responses((status = 200, body = model::LaunchedApp), (status = NOT_FOUND)),
)]
async fn launch_app(
    State(remote): State<Arc<Remote>>,
    Path(name): Path<String>,
) -> Result<Json<model::LaunchedApp>, RemoteError> {
    let app = remote.launch_app(&name).await?;

    Ok(Json(model::LaunchedApp { app_name: app.name }))
}

#[utoipa::path(
    post,
    path = "/home",
    responses((status = 200)),
)]
async fn press_home(State(remote): State<Arc<Remote>>) -> Result<(), RemoteError> {
    remote.home().await
}

#[utoipa::path(
    post,
    path = "/playback/{action}",
    params(("action" = String, Path)),
    responses((status = 200), (status = BAD_REQUEST)),
)]
async fn playback(
    State(remote): State<Arc<Remote>>,
    Path(action): Path<String>,
) -> Result<(), RemoteError> {
    remote.playback(PlaybackAction::parse(&action)?).await
}

#[utoipa::path(
    post,
    path = "/input/set/{name}",
    params(("name" = String, Path)),
    responses((status = 200, body = model::Input), (status = NOT_FOUND)),
)]
async fn set_input(
    State(remote): State<Arc<Remote>>,
    Path(name): Path<String>,
) -> Result<Json<model::Input>, RemoteError> {
    let input = remote.set_input(&name).await?;

    Ok(Json(input.into()))
}

#[utoipa::path(
    get,
    path = "/input",
    responses((status = 200, body = model::PlayingInput), (status = NOT_FOUND)),
)]
async fn get_input(
    State(remote): State<Arc<Remote>>,
) -> Result<Json<model::PlayingInput>, RemoteError> {
    let input_name = remote.current_input().await?;

    Ok(Json(model::PlayingInput { input_name }))
}

#[utoipa::path(
    get,
    path = "/input/all",
    responses((status = 200, body = model::InputList)),
)]
async fn get_all_inputs(
    State(remote): State<Arc<Remote>>,
) -> Result<Json<model::InputList>, RemoteError> {
    let inputs = remote.list_inputs().await?;

    Ok(Json(model::InputList {
        inputs: inputs.into_iter().map(model::Input::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/channel/number/{number}",
    params(("number" = String, Path)),
    responses(
        (status = 200, body = model::Channel),
        (status = BAD_REQUEST),
        (status = NOT_FOUND),
    ),
)]
async fn set_channel_by_number(
    State(remote): State<Arc<Remote>>,
    Path(number): Path<String>,
) -> Result<Json<model::Channel>, RemoteError> {
    let channel = remote.set_channel_by_number(&number).await?;

    Ok(Json(channel.into()))
}

#[utoipa::path(
    post,
    path = "/channel/name/{name}",
    params(("name" = String, Path)),
    responses((status = 200, body = model::Channel), (status = NOT_FOUND)),
)]
async fn set_channel_by_name(
    State(remote): State<Arc<Remote>>,
    Path(name): Path<String>,
) -> Result<Json<model::Channel>, RemoteError> {
    let channel = remote.set_channel_by_name(&name).await?;

    Ok(Json(channel.into()))
}

#[utoipa::path(
    get,
    path = "/channel/all",
    responses((status = 200, body = Vec<model::Channel>)),
)]
async fn get_all_channels(
    State(remote): State<Arc<Remote>>,
) -> Result<Json<Vec<model::Channel>>, RemoteError> {
    let channels = remote.list_channels().await?;

    Ok(Json(channels.into_iter().map(model::Channel::from).collect()))
}
