/*!
 * Page template shared by every generated guide page.
 *
 * Titles, descriptions and URLs are attribute-escaped; the article body is
 * inserted as-is since it comes from trusted, already-rendered content.
 */

use crate::app_config::SiteConfig;

const STYLESHEET: &str = "body{background:#050810;color:#eaf2ff;font-family:system-ui,sans-serif;line-height:1.6;margin:0;padding:1.5rem;}.wrap{max-width:1180px;margin:0 auto;}.nav{display:flex;gap:10px;flex-wrap:wrap;margin-bottom:1.5rem;}.pill{padding:10px 14px;border-radius:999px;border:1px solid rgba(255,255,255,.08);background:rgba(255,255,255,.06);font-weight:700;font-size:13px;color:inherit;text-decoration:none;}.pill.cta{border-color:rgba(125,211,252,.95);background:linear-gradient(135deg,rgba(125,211,252,.45),rgba(96,165,250,.25));}article{background:rgba(12,18,32,.72);border:1px solid rgba(255,255,255,.08);border-radius:18px;padding:1.5rem;}article h1{color:#7dd3fc;}article strong{color:#60a5fa;}.hero-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:12px;margin:1rem 0;}.hero-grid a{color:#7dd3fc;text-decoration:none;padding:8px 12px;border-radius:8px;background:rgba(255,255,255,.05);}";

/// Escape text for use inside an HTML attribute or `<title>`
pub fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Display name for a slug: `wu_ming` -> `Wu Ming`
pub fn slug_title(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut prev_alpha = false;
    for c in slug.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Extra pill appended to the fixed navigation bar
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }

    fn render(&self) -> String {
        format!(
            r#"<a class="pill" href="{}">{}</a>"#,
            escape_attribute(&self.href),
            escape_attribute(&self.label)
        )
    }
}

/// Site-wide parts of the template
#[derive(Debug, Clone)]
pub struct PageLayout {
    base_url: String,
    site_name: String,
    discord_invite: String,
    language: String,
    heroes_href: String,
}

impl PageLayout {
    pub fn new(site: &SiteConfig, guides_prefix: &str) -> Self {
        Self {
            base_url: site.base_url.trim_end_matches('/').to_string(),
            site_name: site.site_name.clone(),
            discord_invite: site.discord_invite.clone(),
            language: site.language.clone(),
            heroes_href: format!("{}/heroes/", guides_prefix),
        }
    }

    /// Absolute URL for a site-relative path
    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    fn head(&self, title: &str, description: &str, canonical_path: &str) -> String {
        format!(
            concat!(
                r#"  <meta charset="utf-8"/><meta name="viewport" content="width=device-width, initial-scale=1"/>"#,
                r#"<title>{}</title><meta name="description" content="{}"/>"#,
                r#"<link rel="canonical" href="{}"/><meta name="robots" content="index,follow"/>"#,
                r#"<link rel="icon" href="/assets/logo.png"/>"#,
            ),
            escape_attribute(title),
            escape_attribute(description),
            escape_attribute(&self.canonical_url(canonical_path)),
        )
    }

    fn nav(&self, extras: &[NavLink]) -> String {
        let extras: String = extras.iter().map(NavLink::render).collect();
        format!(
            r#"<nav class="nav"><a class="pill" href="/">Home</a><a class="pill" href="{}">Heroes</a><a class="pill cta" href="{}" target="_blank" rel="noopener">Join Discord</a>{}</nav>"#,
            escape_attribute(&self.heroes_href),
            escape_attribute(&self.discord_invite),
            extras
        )
    }

    /// Discord call-to-action block closing each article
    pub fn call_to_action(&self) -> String {
        format!(
            r#"<section style="margin-top:2rem;padding:1.5rem;border-radius:18px;background:rgba(12,18,32,.72);text-align:center;"><p style="margin:0 0 .75rem;">More guides on Discord.</p><a class="pill cta" href="{}" target="_blank" rel="noopener">Join {} Discord</a></section>"#,
            escape_attribute(&self.discord_invite),
            escape_attribute(&self.site_name)
        )
    }

    /// Assemble a complete HTML document. Output depends only on the arguments.
    pub fn build_page(
        &self,
        title: &str,
        description: &str,
        canonical_path: &str,
        body_html: &str,
        nav_extras: &[NavLink],
    ) -> String {
        format!(
            r#"<!doctype html><html lang="{}"><head>{}<style>{}</style></head><body><div class="wrap"><header style="display:flex;flex-wrap:wrap;align-items:center;justify-content:space-between;gap:1rem;"><a href="/" style="color:#7dd3fc;font-weight:800;text-decoration:none;">{}</a>{}</header>{}</div></body></html>"#,
            escape_attribute(&self.language),
            self.head(title, description, canonical_path),
            STYLESHEET,
            escape_attribute(&self.site_name),
            self.nav(nav_extras),
            body_html
        )
    }
}
