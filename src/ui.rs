/// Renders the page, injecting `window.API_BASE` only when a base URL is configured.
pub fn render_index(api_base: Option<&str>) -> String {
    let injected = match api_base {
        Some(base) => {
            let literal = serde_json::to_string(base)
                .unwrap_or_else(|_| "\"\"".to_string())
                .replace("</", "<\\/");
            format!("<script>window.API_BASE = {literal};</script>")
        }
        None => String::new(),
    };
    INDEX_HTML.replace("{{API_BASE_SCRIPT}}", &injected)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Greetings &amp; Worlds</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    input,
    select {
      font: inherit;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      width: 100%;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    button:active {
      transform: scale(0.98);
    }

    .error {
      color: #c63b2b;
      min-height: 1.2em;
      font-size: 0.95rem;
    }

    .combo-item {
      padding: 12px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .combo-text {
      font-size: 1.2rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .combo-meta,
    .empty-state {
      color: #7a746d;
      font-size: 0.85rem;
    }

    #loading-spinner {
      display: none;
      position: fixed;
      inset: 0;
      align-items: center;
      justify-content: center;
      background: rgba(248, 243, 230, 0.5);
    }

    #loading-spinner::after {
      content: "";
      width: 42px;
      height: 42px;
      border-radius: 50%;
      border: 4px solid rgba(47, 72, 88, 0.15);
      border-top-color: var(--accent);
      animation: spin 800ms linear infinite;
    }

    @keyframes spin {
      to {
        transform: rotate(360deg);
      }
    }
  </style>
  {{API_BASE_SCRIPT}}
</head>
<body>
  <div id="loading-spinner"></div>
  <main class="app">
    <header>
      <h1>Greetings &amp; Worlds</h1>
    </header>

    <section class="panel">
      <div class="card">
        <h2>Greetings</h2>
        <input id="greeting-input" placeholder="Hello" />
        <button id="add-greeting-btn" type="button">Add greeting</button>
        <div id="greeting-error" class="error"></div>
      </div>
      <div class="card">
        <h2>Audiences</h2>
        <input id="audience-input" placeholder="World" />
        <button id="add-audience-btn" type="button">Add audience</button>
        <div id="audience-error" class="error"></div>
      </div>
    </section>

    <section class="card">
      <h2>Create a combo</h2>
      <select id="greeting-select"></select>
      <select id="audience-select"></select>
      <button id="create-combo-btn" type="button">Create combo</button>
      <div id="combo-error" class="error"></div>
    </section>

    <section class="card">
      <h2>Combos</h2>
      <input id="filter-input" placeholder="Filter combos" />
      <div id="combos-list"></div>
    </section>
  </main>
  <script src="/app.js"></script>
</body>
</html>
"#;

pub const APP_JS: &str = r#"const API_BASE =
  typeof window !== 'undefined' && window.API_BASE
    ? window.API_BASE
    : 'https://greetings-and-worlds-api.brian-mabry-edwards.workers.dev';

const ERROR_CLEAR_MS = 5000;

const state = {
  greetings: [],
  audiences: [],
  combos: []
};

const byId = (id) => document.getElementById(id);

const showSpinner = () => {
  byId('loading-spinner').style.display = 'flex';
};

const hideSpinner = () => {
  byId('loading-spinner').style.display = 'none';
};

const showError = (elementId, message) => {
  const el = byId(elementId);
  if (!el) {
    return;
  }
  el.textContent = message;
  setTimeout(() => {
    el.textContent = '';
  }, ERROR_CLEAR_MS);
};

const escapeHtml = (value) =>
  String(value)
    .replace(/&/g, '&amp;')
    .replace(/</g, '&lt;')
    .replace(/>/g, '&gt;')
    .replace(/"/g, '&quot;')
    .replace(/'/g, '&#39;');

const fetchAPI = async (endpoint, options = {}) => {
  showSpinner();
  try {
    const res = await fetch(`${API_BASE}${endpoint}`, {
      ...options,
      headers: {
        'Content-Type': 'application/json',
        ...options.headers
      }
    });
    if (!res.ok) {
      throw new Error(`HTTP ${res.status}: ${res.statusText}`);
    }
    return await res.json();
  } finally {
    hideSpinner();
  }
};

const fillSelect = (id, placeholder, rows) => {
  const select = byId(id);
  select.innerHTML = `<option value="">${placeholder}</option>`;
  rows.forEach((row) => {
    const option = document.createElement('option');
    option.value = row.id;
    option.textContent = row.text;
    select.appendChild(option);
  });
};

const renderCombos = (rows) => {
  const container = byId('combos-list');
  if (rows.length === 0) {
    container.innerHTML = '<p class="empty-state">No combos found</p>';
    return;
  }
  container.innerHTML = rows
    .map(
      (combo) => `<div class="combo-item">
        <div class="combo-text">${escapeHtml(combo.greeting_text)}, ${escapeHtml(combo.audience_text)}!</div>
        <div class="combo-meta">Greeting ID: ${combo.greeting_id}, Audience ID: ${combo.audience_id}</div>
      </div>`
    )
    .join('');
};

const filterCombos = (query) => {
  const needle = query.toLowerCase();
  renderCombos(
    state.combos.filter((combo) =>
      `${combo.greeting_text} ${combo.audience_text}`.toLowerCase().includes(needle)
    )
  );
};

const loadGreetings = async () => {
  try {
    state.greetings = await fetchAPI('/api/greetings');
    fillSelect('greeting-select', '-- Choose Greeting --', state.greetings);
  } catch {
    showError('greeting-error', 'Failed to load greetings');
  }
};

const loadAudiences = async () => {
  try {
    state.audiences = await fetchAPI('/api/audiences');
    fillSelect('audience-select', '-- Choose Audience --', state.audiences);
  } catch {
    showError('audience-error', 'Failed to load audiences');
  }
};

const loadCombos = async () => {
  try {
    state.combos = await fetchAPI('/api/combos');
    renderCombos(state.combos);
  } catch {
    showError('combo-error', 'Failed to load combos');
  }
};

const addText = async ({ inputId, errorId, endpoint, emptyMessage, failMessage, reload }) => {
  const input = byId(inputId);
  const text = input.value.trim();
  if (!text) {
    showError(errorId, emptyMessage);
    return;
  }
  try {
    await fetchAPI(endpoint, { method: 'POST', body: JSON.stringify({ text }) });
    input.value = '';
    await reload();
  } catch {
    showError(errorId, failMessage);
  }
};

const addGreeting = () =>
  addText({
    inputId: 'greeting-input',
    errorId: 'greeting-error',
    endpoint: '/api/greetings',
    emptyMessage: 'Please enter a greeting',
    failMessage: 'Failed to add greeting',
    reload: loadGreetings
  });

const addAudience = () =>
  addText({
    inputId: 'audience-input',
    errorId: 'audience-error',
    endpoint: '/api/audiences',
    emptyMessage: 'Please enter an audience',
    failMessage: 'Failed to add audience',
    reload: loadAudiences
  });

const createCombo = async () => {
  const greetingSelect = byId('greeting-select');
  const audienceSelect = byId('audience-select');
  if (!greetingSelect.value || !audienceSelect.value) {
    showError('combo-error', 'Please select both greeting and audience');
    return;
  }
  try {
    await fetchAPI('/api/combos', {
      method: 'POST',
      body: JSON.stringify({
        greeting_id: parseInt(greetingSelect.value, 10),
        audience_id: parseInt(audienceSelect.value, 10)
      })
    });
    greetingSelect.value = '';
    audienceSelect.value = '';
    await loadCombos();
  } catch {
    showError('combo-error', 'Failed to create combo (may already exist)');
  }
};

const onEnter = (handler) => (event) => {
  if (event.key === 'Enter') {
    handler();
  }
};

byId('add-greeting-btn').addEventListener('click', addGreeting);
byId('add-audience-btn').addEventListener('click', addAudience);
byId('create-combo-btn').addEventListener('click', createCombo);
byId('greeting-input').addEventListener('keypress', onEnter(addGreeting));
byId('audience-input').addEventListener('keypress', onEnter(addAudience));
byId('filter-input').addEventListener('input', (event) => filterCombos(event.target.value));

Promise.all([loadGreetings(), loadAudiences(), loadCombos()]);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_injected_as_js_string() {
        let html = render_index(Some("http://127.0.0.1:8787"));
        assert!(html.contains(r#"<script>window.API_BASE = "http://127.0.0.1:8787";</script>"#));
    }

    #[test]
    fn injected_base_cannot_close_the_script() {
        let html = render_index(Some("</script><b>"));
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn unset_base_leaves_fallback_to_script() {
        let html = render_index(None);
        assert!(!html.contains("window.API_BASE ="));
        assert!(!html.contains("{{API_BASE_SCRIPT}}"));
        assert!(APP_JS.contains("https://greetings-and-worlds-api.brian-mabry-edwards.workers.dev"));
    }
}
