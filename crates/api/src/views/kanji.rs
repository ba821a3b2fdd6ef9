use kanji_db::models::kanji::Kanji;

use super::escape;

pub const EMPTY_KANJI_MESSAGE: &str = "No kanji found in the database.";

/// One kanji card.
pub fn kanji_card(kanji: &Kanji) -> String {
    format!(
        r#"<div class="kanji-card" id="kanji-{id}">
  <span class="kanji-glyph">{glyph}</span>
  <p><strong>On'yomi:</strong> {h_on} ({r_on})</p>
  <p><strong>Kun'yomi:</strong> {h_kun} ({r_kun})</p>
  <p><strong>JLPT Level:</strong> {level}</p>
</div>"#,
        id = kanji.kanji_char_id,
        glyph = escape(&kanji.kanji_char),
        h_on = escape(&kanji.hiragana_onyomi),
        r_on = escape(&kanji.romaji_onyomi),
        h_kun = escape(&kanji.hiragana_kunyomi),
        r_kun = escape(&kanji.romaji_kunyomi),
        level = kanji.jlpt_level.display_label(),
    )
}

/// Grid of cards in the given order, or the empty-state message.
pub fn kanji_list(kanji: &[Kanji]) -> String {
    let body = if kanji.is_empty() {
        format!(r#"<div class="empty-state">{EMPTY_KANJI_MESSAGE}</div>"#)
    } else {
        kanji.iter().map(kanji_card).collect::<Vec<_>>().join("\n")
    };
    format!("<div class=\"kanji-grid\">\n{body}\n</div>")
}
