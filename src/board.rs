use crate::banner::{Banners, Region};
use crate::client::{ApiClient, Spinner, Transport};
use crate::models::{Audience, Combo, ComboDetail, Greeting};
use crate::view::{
    filter_combos, ComboListView, SelectView, AUDIENCE_PLACEHOLDER, GREETING_PLACEHOLDER,
};
use serde_json::json;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

pub const EMPTY_GREETING: &str = "Please enter a greeting";
pub const EMPTY_AUDIENCE: &str = "Please enter an audience";
pub const MISSING_SELECTION: &str = "Please select both greeting and audience";
pub const ADD_GREETING_FAILED: &str = "Failed to add greeting";
pub const ADD_AUDIENCE_FAILED: &str = "Failed to add audience";
pub const CREATE_COMBO_FAILED: &str = "Failed to create combo (may already exist)";
pub const LOAD_GREETINGS_FAILED: &str = "Failed to load greetings";
pub const LOAD_AUDIENCES_FAILED: &str = "Failed to load audiences";
pub const LOAD_COMBOS_FAILED: &str = "Failed to load combos";

/// View state for the greetings page: the loaded arrays, the form fields and
/// what each region currently shows.
///
/// Every operation takes `&self` and the lock is never held across a request,
/// so overlapping actions interleave the way they would in a browser tab.
/// Each successful reload swaps its whole array.
pub struct Board<T> {
    api: ApiClient<T>,
    state: Mutex<BoardState>,
}

struct BoardState {
    greetings: Vec<Greeting>,
    audiences: Vec<Audience>,
    combos: Vec<ComboDetail>,
    greeting_input: String,
    audience_input: String,
    greeting_select: SelectView,
    audience_select: SelectView,
    combos_list: ComboListView,
    banners: Banners,
}

impl<T: Transport> Board<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            state: Mutex::new(BoardState {
                greetings: Vec::new(),
                audiences: Vec::new(),
                combos: Vec::new(),
                greeting_input: String::new(),
                audience_input: String::new(),
                greeting_select: SelectView::new(GREETING_PLACEHOLDER),
                audience_select: SelectView::new(AUDIENCE_PLACEHOLDER),
                combos_list: ComboListView::Empty,
                banners: Banners::default(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        // Poisoning leaves the view data intact.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn spinner(&self) -> &Spinner {
        self.api.spinner()
    }

    pub async fn init(&self) {
        info!("loading greetings, audiences and combos");
        tokio::join!(self.load_greetings(), self.load_audiences(), self.load_combos());
    }

    pub async fn load_greetings(&self) {
        match self.api.get::<Vec<Greeting>>("/api/greetings").await {
            Ok(rows) => {
                let mut state = self.state();
                state
                    .greeting_select
                    .fill(rows.iter().map(|row| (row.id, row.text.as_str())));
                state.greetings = rows;
            }
            Err(_) => self.show_error(Region::Greeting, LOAD_GREETINGS_FAILED),
        }
    }

    pub async fn load_audiences(&self) {
        match self.api.get::<Vec<Audience>>("/api/audiences").await {
            Ok(rows) => {
                let mut state = self.state();
                state
                    .audience_select
                    .fill(rows.iter().map(|row| (row.id, row.text.as_str())));
                state.audiences = rows;
            }
            Err(_) => self.show_error(Region::Audience, LOAD_AUDIENCES_FAILED),
        }
    }

    pub async fn load_combos(&self) {
        match self.api.get::<Vec<ComboDetail>>("/api/combos").await {
            Ok(rows) => {
                let mut state = self.state();
                state.combos_list = ComboListView::render(&rows);
                state.combos = rows;
            }
            Err(_) => self.show_error(Region::Combo, LOAD_COMBOS_FAILED),
        }
    }

    pub async fn add_greeting(&self) {
        let text = self.state().greeting_input.trim().to_string();
        if text.is_empty() {
            self.show_error(Region::Greeting, EMPTY_GREETING);
            return;
        }

        match self
            .api
            .post::<Greeting>("/api/greetings", &json!({ "text": text }))
            .await
        {
            Ok(_) => {
                self.state().greeting_input.clear();
                self.load_greetings().await;
            }
            Err(_) => self.show_error(Region::Greeting, ADD_GREETING_FAILED),
        }
    }

    pub async fn add_audience(&self) {
        let text = self.state().audience_input.trim().to_string();
        if text.is_empty() {
            self.show_error(Region::Audience, EMPTY_AUDIENCE);
            return;
        }

        match self
            .api
            .post::<Audience>("/api/audiences", &json!({ "text": text }))
            .await
        {
            Ok(_) => {
                self.state().audience_input.clear();
                self.load_audiences().await;
            }
            Err(_) => self.show_error(Region::Audience, ADD_AUDIENCE_FAILED),
        }
    }

    pub async fn create_combo(&self) {
        let (greeting_id, audience_id) = {
            let state = self.state();
            (
                state.greeting_select.value().parse::<i64>(),
                state.audience_select.value().parse::<i64>(),
            )
        };
        let (Ok(greeting_id), Ok(audience_id)) = (greeting_id, audience_id) else {
            self.show_error(Region::Combo, MISSING_SELECTION);
            return;
        };

        let body = json!({ "greeting_id": greeting_id, "audience_id": audience_id });
        match self.api.post::<Combo>("/api/combos", &body).await {
            Ok(_) => {
                {
                    let mut state = self.state();
                    state.greeting_select.clear();
                    state.audience_select.clear();
                }
                self.load_combos().await;
            }
            Err(_) => self.show_error(Region::Combo, CREATE_COMBO_FAILED),
        }
    }

    /// Re-renders the combo list from the last loaded array. Never touches the network.
    pub fn filter_combos(&self, query: &str) {
        let mut state = self.state();
        let visible = ComboListView::render(filter_combos(&state.combos, query));
        state.combos_list = visible;
    }

    pub fn set_greeting_input(&self, text: impl Into<String>) {
        self.state().greeting_input = text.into();
    }

    pub fn set_audience_input(&self, text: impl Into<String>) {
        self.state().audience_input = text.into();
    }

    pub fn choose_greeting(&self, value: &str) {
        self.state().greeting_select.select(value);
    }

    pub fn choose_audience(&self, value: &str) {
        self.state().audience_select.select(value);
    }

    pub fn greeting_input(&self) -> String {
        self.state().greeting_input.clone()
    }

    pub fn audience_input(&self) -> String {
        self.state().audience_input.clone()
    }

    pub fn greeting_select(&self) -> SelectView {
        self.state().greeting_select.clone()
    }

    pub fn audience_select(&self) -> SelectView {
        self.state().audience_select.clone()
    }

    pub fn combos_list(&self) -> ComboListView {
        self.state().combos_list.clone()
    }

    pub fn combos(&self) -> Vec<ComboDetail> {
        self.state().combos.clone()
    }

    pub fn greetings(&self) -> Vec<Greeting> {
        self.state().greetings.clone()
    }

    pub fn audiences(&self) -> Vec<Audience> {
        self.state().audiences.clone()
    }

    pub fn error_text(&self, region: Region) -> String {
        self.state().banners.get(region).text().to_string()
    }

    fn show_error(&self, region: Region, message: &str) {
        self.state().banners.show(region, message);
    }
}
