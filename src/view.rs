use crate::models::ComboDetail;

pub const EMPTY_COMBOS: &str = "No combos found";
pub const GREETING_PLACEHOLDER: &str = "-- Choose Greeting --";
pub const AUDIENCE_PLACEHOLDER: &str = "-- Choose Audience --";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A select list whose first entry is a placeholder with the empty-string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub placeholder: &'static str,
    pub options: Vec<SelectOption>,
    selected: String,
}

impl SelectView {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            options: Vec::new(),
            selected: String::new(),
        }
    }

    /// Rebuilds the options from `(id, text)` rows. Any previous selection is lost.
    pub fn fill<'a>(&mut self, rows: impl IntoIterator<Item = (i64, &'a str)>) {
        self.options = rows
            .into_iter()
            .map(|(id, text)| SelectOption {
                value: id.to_string(),
                label: text.to_string(),
            })
            .collect();
        self.selected.clear();
    }

    /// Values that match no option leave the select unset.
    pub fn select(&mut self, value: &str) {
        if self.options.iter().any(|option| option.value == value) {
            self.selected = value.to_string();
        } else {
            self.selected.clear();
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn value(&self) -> &str {
        &self.selected
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<option value=\"\">{}</option>", escape_html(self.placeholder));
        for option in &self.options {
            html.push_str(&format!(
                "<option value=\"{}\">{}</option>",
                escape_html(&option.value),
                escape_html(&option.label)
            ));
        }
        html
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboCard {
    pub text: String,
    pub meta: String,
}

impl From<&ComboDetail> for ComboCard {
    fn from(combo: &ComboDetail) -> Self {
        Self {
            text: format!("{}, {}!", combo.greeting_text, combo.audience_text),
            meta: format!(
                "Greeting ID: {}, Audience ID: {}",
                combo.greeting_id, combo.audience_id
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ComboListView {
    #[default]
    Empty,
    Items(Vec<ComboCard>),
}

impl ComboListView {
    pub fn render<'a>(combos: impl IntoIterator<Item = &'a ComboDetail>) -> Self {
        let cards: Vec<ComboCard> = combos.into_iter().map(ComboCard::from).collect();
        if cards.is_empty() {
            Self::Empty
        } else {
            Self::Items(cards)
        }
    }

    pub fn cards(&self) -> &[ComboCard] {
        match self {
            Self::Empty => &[],
            Self::Items(cards) => cards,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Empty => format!("<p class=\"empty-state\">{EMPTY_COMBOS}</p>"),
            Self::Items(cards) => cards
                .iter()
                .map(|card| {
                    format!(
                        "<div class=\"combo-item\"><div class=\"combo-text\">{}</div><div class=\"combo-meta\">{}</div></div>",
                        escape_html(&card.text),
                        escape_html(&card.meta)
                    )
                })
                .collect(),
        }
    }
}

/// Case-insensitive substring match against `"<greeting> <audience>"`.
pub fn filter_combos<'a>(combos: &'a [ComboDetail], query: &str) -> Vec<&'a ComboDetail> {
    let needle = query.to_lowercase();
    combos
        .iter()
        .filter(|combo| {
            format!("{} {}", combo.greeting_text, combo.audience_text)
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
