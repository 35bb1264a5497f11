use crate::auth::{AccessKind, AccessUpdate};
use crate::entity::{Entity, EntityKind};
use crate::gateway::{Gateway, GatewayError};
use crate::screen::{DeleteRequest, EntityScreen, SaveRequest, Screen};
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Load { kind: EntityKind, generation: u64 },
    Save(SaveRequest),
    Delete(DeleteRequest),
    AssignAccess(AccessUpdate),
    SetToken { token: Option<String> },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    gateway: &'a mut Gateway,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, gateway: &'a mut Gateway) -> Self {
        Handler { state, gateway }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Load { kind, generation } => self.load(kind, generation).await,
            Event::Save(request) => self.save(request).await,
            Event::Delete(request) => self.delete(request).await,
            Event::AssignAccess(update) => self.assign_access(update).await,
            Event::SetToken { token } => {
                self.gateway.set_access_token(token);
                Ok(())
            }
        }
    }

    /// Tear down the session after the gateway rejected the token.
    ///
    async fn unauthorized(&mut self) -> Result<()> {
        self.gateway.set_access_token(None);
        let mut state = self.state.lock().await;
        if state.is_authenticated() {
            state.force_logout();
        }
        Ok(())
    }

    /// Fetch a collection and hand it to its screen.
    ///
    async fn load(&mut self, kind: EntityKind, generation: u64) -> Result<()> {
        match kind {
            EntityKind::User => {
                self.load_into(generation, State::users_mut).await?;
                self.state.lock().await.sync_user_access();
            }
            EntityKind::Role => self.load_into(generation, State::roles_mut).await?,
            EntityKind::Permission => self.load_into(generation, State::permissions_mut).await?,
            EntityKind::Module => self.load_into(generation, State::modules_mut).await?,
            EntityKind::Country => self.load_into(generation, State::countries_mut).await?,
            EntityKind::State => self.load_into(generation, State::states_mut).await?,
            EntityKind::City => self.load_into(generation, State::cities_mut).await?,
        }
        Ok(())
    }

    async fn load_into<E: Entity>(
        &mut self,
        generation: u64,
        screen: fn(&mut State) -> &mut EntityScreen<E>,
    ) -> Result<()> {
        info!("Fetching {}...", E::KIND.plural());
        let result = self.gateway.list::<E>().await;
        if matches!(&result, Err(e) if e.is_unauthorized()) {
            return self.unauthorized().await;
        }
        let mut state = self.state.lock().await;
        if screen(&mut *state).finish_fetch(generation, result) {
            debug!("Applied {} response", E::KIND.plural());
        }
        Ok(())
    }

    /// Begin the re-fetch that follows a successful mutation.
    ///
    async fn reload(&mut self, kind: EntityKind) -> Result<()> {
        let generation = self.state.lock().await.screen_mut(kind).begin_fetch();
        self.load(kind, generation).await
    }

    async fn save(&mut self, request: SaveRequest) -> Result<()> {
        let result = self
            .gateway
            .save(request.kind, request.mode, &request.payload)
            .await;
        if matches!(&result, Err(e) if e.is_unauthorized()) {
            return self.unauthorized().await;
        }
        let refetch = {
            let mut state = self.state.lock().await;
            let refetch = state
                .screen_mut(request.kind)
                .finish_save(request.mode, &request.label, result);
            state.after_save(request.kind);
            refetch
        };
        if refetch {
            self.reload(request.kind).await?;
        }
        Ok(())
    }

    async fn delete(&mut self, request: DeleteRequest) -> Result<()> {
        let result = self.gateway.delete(request.kind, &request.id).await;
        if matches!(&result, Err(e) if e.is_unauthorized()) {
            return self.unauthorized().await;
        }
        let refetch = self
            .state
            .lock()
            .await
            .screen_mut(request.kind)
            .finish_delete(&request.label, result);
        if refetch {
            self.reload(request.kind).await?;
        }
        Ok(())
    }

    /// Send a local access change to the gateway. A failure keeps the local
    /// change.
    ///
    async fn assign_access(&mut self, update: AccessUpdate) -> Result<()> {
        info!(
            "Sending {:?} for user {} to gateway...",
            update.kind, update.user_id
        );
        let result = match update.kind {
            AccessKind::Roles => self.gateway.assign_roles(&update.user_id, &update.tags).await,
            AccessKind::Permissions => {
                self.gateway
                    .assign_permissions(&update.user_id, &update.tags)
                    .await
            }
            AccessKind::Modules => {
                self.gateway
                    .assign_modules(&update.user_id, &update.tags)
                    .await
            }
        };
        match result {
            Ok(()) => Ok(()),
            Err(GatewayError::Unauthorized) => self.unauthorized().await,
            Err(e) => {
                self.state.lock().await.access_update_failed(&update, &e);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entity::SaveMode;
    use crate::logger::LogBuffer;
    use crate::router::Route;
    use httpmock::MockServer;
    use serde_json::json;
    use std::sync::mpsc::{channel, Receiver};

    fn signed_in_state(roles: &[&str]) -> (Arc<Mutex<State>>, Receiver<Event>) {
        let (net_tx, net_rx) = channel();
        let (save_tx, _save_rx) = channel();
        let mut config = Config::new();
        config.access_token = Some("abc".to_string());
        config.session_roles = roles.iter().map(|r| r.to_string()).collect();
        let mut state = State::new(net_tx, save_tx, &config, LogBuffer::new(10));
        state.start();
        net_rx.try_iter().for_each(drop);
        (Arc::new(Mutex::new(state)), net_rx)
    }

    #[tokio::test]
    async fn load_applies_current_generation() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/City/get-all-cities");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": [
                        { "cityId": 1, "cityName": "Austin", "postalCode": "73301",
                          "stateName": "Texas", "countryName": "USA", "status": "True" }
                    ]
                }));
            })
            .await;

        let (state, _rx) = signed_in_state(&["admin"]);
        let generation = state.lock().await.screen_mut(EntityKind::City).begin_fetch();
        let mut gateway = Gateway::new(&server.base_url(), Some("abc"));
        Handler::new(&state, &mut gateway)
            .handle(Event::Load {
                kind: EntityKind::City,
                generation,
            })
            .await?;

        let state = state.lock().await;
        let screen = state.screen(EntityKind::City);
        assert_eq!(screen.total_records(), 1);
        assert_eq!(screen.rows()[0][0], "Austin");
        assert!(!screen.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_forces_logout() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/Roles/get-all-role");
                then.status(401);
            })
            .await;

        let (state, rx) = signed_in_state(&["admin"]);
        let generation = state.lock().await.screen_mut(EntityKind::Role).begin_fetch();
        let mut gateway = Gateway::new(&server.base_url(), Some("abc"));
        Handler::new(&state, &mut gateway)
            .handle(Event::Load {
                kind: EntityKind::Role,
                generation,
            })
            .await?;

        assert!(!gateway.has_access_token());
        let state = state.lock().await;
        assert!(!state.is_authenticated());
        assert_eq!(state.route(), &Route::Login);
        assert!(rx
            .try_iter()
            .any(|e| matches!(e, Event::SetToken { token: None })));
        Ok(())
    }

    #[tokio::test]
    async fn save_success_refetches() -> Result<()> {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method("POST").path("/Country/country-create");
                then.status(200)
                    .json_body(json!({ "success": true, "statusCode": 201 }));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method("GET").path("/Country/countries-all");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": [{ "countryId": 3, "countryName": "Peru", "countryCode": "PE", "status": "True" }]
                }));
            })
            .await;

        let (state, _rx) = signed_in_state(&["admin"]);
        let mut gateway = Gateway::new(&server.base_url(), Some("abc"));
        let request = SaveRequest {
            kind: EntityKind::Country,
            mode: SaveMode::Create,
            payload: json!({ "countryName": "Peru", "countryCode": "PE", "status": "True" }),
            label: "Peru".to_string(),
        };
        Handler::new(&state, &mut gateway)
            .handle(Event::Save(request))
            .await?;

        create.assert_async().await;
        list.assert_async().await;
        let state = state.lock().await;
        let screen = state.screen(EntityKind::Country);
        assert_eq!(screen.total_records(), 1);
        assert_eq!(
            screen.notice().map(|n| n.message.as_str()),
            Some("Country created successfully")
        );
        Ok(())
    }

    #[tokio::test]
    async fn assign_failure_keeps_local_change() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("PUT").path("/Users/assign-modules/9");
                then.status(404);
            })
            .await;

        let (state, _rx) = signed_in_state(&["super_admin"]);
        let update = AccessUpdate {
            user_id: "9".to_string(),
            kind: AccessKind::Modules,
            tags: vec!["geography".to_string()],
            discarded_override: false,
        };
        let mut gateway = Gateway::new(&server.base_url(), Some("abc"));
        Handler::new(&state, &mut gateway)
            .handle(Event::AssignAccess(update))
            .await?;

        let state = state.lock().await;
        assert!(state.is_authenticated());
        assert!(state
            .users()
            .notice()
            .unwrap()
            .message
            .contains("Request failed with status 404"));
        Ok(())
    }
}
