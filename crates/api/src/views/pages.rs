pub const HOME_TITLE: &str = "Kanji Go";
pub const HOME_MESSAGE: &str = "Welcome to Kanji Go!";

/// Confirmation dialog; its Cancel button clears the container via `/empty`.
pub const DIALOG: &str = r##"<div class="overlay blur active"></div>
<dialog class="active">
  <h5>Custom overlay</h5>
  <div>Some text here</div>
  <nav class="right-align no-space">
    <button class="transparent link" hx-get="/empty" hx-target="#dialog-container" hx-swap="innerHTML">Cancel</button>
    <button class="transparent link">Confirm</button>
  </nav>
</dialog>"##;
