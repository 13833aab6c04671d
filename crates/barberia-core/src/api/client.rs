//! HTTP implementation of the appointment service contract.

use async_trait::async_trait;
use jiff::civil::Date;
use log::{debug, info, warn};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{detail::extract_detail, AdminService, AppointmentService};
use crate::{
    error::{BookingError, Result},
    models::{
        AccessToken, Appointment, AvailabilityResponse, NewAppointment, NewUser, TimeSlot, User,
    },
    params::{Login, Signup},
    session::SessionStore,
};

/// Shortest password accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Whether a request carries the stored bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Login and signup; a `401` here is an ordinary server answer
    Anonymous,
    /// Everything else; a `401` purges the session
    Bearer,
}

/// REST client for the barber shop API.
///
/// Authenticated requests carry `Authorization: Bearer <token>` from the
/// [`SessionStore`]; a `401` answer clears the stored credential and user.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String, session: SessionStore) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The persistent session backing this client.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Exchanges credentials for a token, stores it, then fetches and caches
    /// the user's profile.
    pub async fn login(&self, params: &Login) -> Result<User> {
        if params.username.trim().is_empty() || params.password.is_empty() {
            return Err(BookingError::validation("credentials")
                .with_reason("username and password are required"));
        }

        let request = self
            .http
            .post(self.url("/token"))
            .form(&[("username", params.username.as_str()), ("password", params.password.as_str())]);
        let token: AccessToken = self.send_json(request, Auth::Anonymous).await?;

        self.session.store_token(&token.access_token).await?;
        info!("Logged in as {}", params.username);

        self.current_user().await
    }

    /// Registers a new account. Does not log in.
    pub async fn signup(&self, params: &Signup) -> Result<User> {
        if params.username.trim().is_empty() {
            return Err(BookingError::validation("username").with_reason("cannot be empty"));
        }
        if !params.email.contains('@') {
            return Err(BookingError::validation("email").with_reason("must be an email address"));
        }
        if params.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BookingError::validation("password").with_reason(format!(
                "must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let body = NewUser {
            username: params.username.clone(),
            email: params.email.clone(),
            password: params.password.clone(),
        };
        let request = self.http.post(self.url("/signup")).json(&body);
        self.send_json(request, Auth::Anonymous).await
    }

    /// Fetches the logged-in user's profile and caches it in the session.
    pub async fn current_user(&self) -> Result<User> {
        let user: User = self.get_json("/users/me").await?;
        self.session.store_user(&user).await?;
        Ok(user)
    }

    /// The last-known profile without touching the network.
    pub async fn cached_user(&self) -> Result<Option<User>> {
        self.session.user().await
    }

    /// Verifies the stored session against the server.
    ///
    /// Returns `None` when there is no credential or the server rejected it.
    pub async fn check_auth(&self) -> Result<Option<User>> {
        if self.session.token().await?.is_none() {
            return Ok(None);
        }

        match self.current_user().await {
            Ok(user) => Ok(Some(user)),
            Err(BookingError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Forgets the credential and the cached profile.
    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await?;
        info!("Logged out");
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.http.get(self.url(path));
        self.send_json(request, Auth::Bearer).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, auth: Auth) -> Result<T> {
        let response = self.send(request, auth).await?;
        Ok(response.json().await?)
    }

    /// Sends a request and turns non-2xx answers into errors.
    async fn send(&self, request: RequestBuilder, auth: Auth) -> Result<Response> {
        let request = match auth {
            Auth::Bearer => match self.session.token().await? {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            Auth::Anonymous => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| BookingError::network(format!("Could not reach {}: {e}", self.base_url)))?;

        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && auth == Auth::Bearer {
            warn!("Credential rejected by server, clearing session");
            self.session.clear().await?;
            return Err(BookingError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BookingError::server(status.as_u16(), extract_detail(&body)))
    }
}

#[async_trait]
impl AppointmentService for ApiClient {
    async fn availability(&self, date: Date) -> Result<Vec<TimeSlot>> {
        let response: AvailabilityResponse = self
            .get_json(&format!("/appointments/availability/{date}"))
            .await?;
        Ok(response.available_slots)
    }

    async fn create_appointment(&self, appointment: &NewAppointment) -> Result<Appointment> {
        let request = self.http.post(self.url("/appointments/")).json(appointment);
        let created: Appointment = self.send_json(request, Auth::Bearer).await?;
        info!(
            "Booked appointment {} on {} at {}",
            created.id, created.date, created.time
        );
        Ok(created)
    }

    async fn my_appointments(&self) -> Result<Vec<Appointment>> {
        self.get_json("/appointments/my-appointments").await
    }

    async fn cancel_appointment(&self, id: u64) -> Result<()> {
        let request = self.http.delete(self.url(&format!("/appointments/{id}")));
        match self.send(request, Auth::Bearer).await {
            Ok(_) => {
                info!("Cancelled appointment {id}");
                Ok(())
            }
            Err(BookingError::Server { status: 404, .. }) => {
                debug!("Appointment {id} already gone, treating cancel as done");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl AdminService for ApiClient {
    async fn all_appointments(&self) -> Result<Vec<Appointment>> {
        self.get_json("/appointments/admin/all-appointments").await
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        self.get_json("/admin/users").await
    }
}
