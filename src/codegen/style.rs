//! Inline styles. The output must survive pasting into a rich-text field, so
//! there are no `<style>` blocks; every element carries its own `style`.

pub const PAGE: &str = "max-width: 980px; margin: 0 auto; padding: 24px 18px; \
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; \
    color: #111; background: #fff;";

pub const HEADER: &str = "padding: 18px 18px 14px 18px; margin: 0 0 18px 0; \
    border: 1px solid #e5e7eb; border-radius: 14px; \
    box-shadow: 0 6px 20px rgba(0,0,0,0.06);";

pub const TITLE: &str = "margin: 0; font-size: 24px; line-height: 1.2;";

pub const SUBTITLE: &str = "margin: 6px 0 0 0; font-size: 14px; color: #444;";

pub const EPIGRAPH: &str = "margin: 14px 0 0 0; padding-left: 14px; border-left: 3px solid #e5e7eb; \
    font-size: 14px; color: #333;";

pub const QUOTE: &str = "font-style: italic;";

pub const ATTRIBUTION: &str = "margin-top: 8px;";

pub const SECTION: &str = "margin: 22px 0 12px 0; padding-top: 10px; font-size: 20px; line-height: 1.25;";

pub const CARD: &str = "margin: 12px 0; padding: 14px 16px; \
    border: 1px solid #e5e7eb; border-radius: 14px; \
    box-shadow: 0 6px 18px rgba(0,0,0,0.05); background: #fff;";

pub const CARD_TITLE: &str = "margin: 0 0 10px 0; font-size: 14px; letter-spacing: 0.02em; \
    color: #374151; text-transform: uppercase;";

pub const PARAGRAPH: &str = "margin: 0.6em 0; line-height: 1.45;";

pub const LIST: &str = "margin: 0.6em 0 0.6em 1.2em; padding-left: 1.2em;";

pub const LIST_ITEM: &str = "margin: 0.35em 0;";

pub const HIDDEN: &str = "display:none;";
