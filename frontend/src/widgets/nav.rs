use std::rc::Rc;

use chrono::{Datelike, Local};
use log::debug;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config;
use crate::dom::{self, Listener, UiElement};
use crate::error::BindError;

const NAV_ACTIVE: &str = "nav-active";

/// Id of the section the reader is in: the last one whose top, minus the
/// nav offset, is at or above the scroll position.
pub fn active_section<'a>(scroll_y: f64, sections: &'a [(String, f64)]) -> Option<&'a str> {
    sections
        .iter()
        .filter(|(_, top)| scroll_y >= top - config::NAV_SECTION_OFFSET_PX)
        .last()
        .map(|(id, _)| id.as_str())
}

fn set_menu_icon(button: &Element, open: bool) {
    if let Some(icon) = dom::query_in(button, "i") {
        icon.toggle_class("fa-bars", !open);
        icon.toggle_class("fa-times", open);
    }
}

pub fn bind_mobile_menu(button: Element, menu: Element) -> Result<Vec<Listener>, BindError> {
    let mut listeners = Vec::new();
    {
        let menu = menu.clone();
        let icon_host = button.clone();
        listeners.push(Listener::new(&button, "click", move |_| {
            let _ = menu.class_list().toggle("hidden");
            set_menu_icon(&icon_host, !menu.class_list().contains("hidden"));
        })?);
    }
    for link in dom::query_all_in(&menu, "a") {
        let menu = menu.clone();
        let button = button.clone();
        listeners.push(Listener::new(&link, "click", move |_| {
            menu.toggle_class("hidden", true);
            set_menu_icon(&button, false);
        })?);
    }
    Ok(listeners)
}

/// Smooth scrolling for in-page links, leaving room for the fixed header.
pub fn bind_anchor_links(document: &Document, anchors: Vec<Element>) -> Result<Vec<Listener>, BindError> {
    let mut listeners = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        if href.is_empty() || href == "#" {
            continue;
        }
        let document = document.clone();
        listeners.push(Listener::new(&anchor, "click", move |event| {
            let Some(target) = document
                .query_selector(&href)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            event.prevent_default();
            if let Some(window) = web_sys::window() {
                let options = ScrollToOptions::new();
                options.set_top(f64::from(target.offset_top()) - config::ANCHOR_SCROLL_OFFSET_PX);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }
        })?);
    }
    Ok(listeners)
}

/// Highlights the nav link of the current section. Recomputed on every
/// scroll event, which is cheap for a handful of sections.
pub fn bind_active_link(sections: Vec<Element>, links: Vec<Element>) -> Result<Option<Listener>, BindError> {
    if links.is_empty() {
        return Ok(None);
    }
    if let Some(home) = links
        .iter()
        .find(|link| link.get_attribute("href").as_deref() == Some("#home"))
    {
        home.toggle_class(NAV_ACTIVE, true);
    }
    let sections: Rc<Vec<HtmlElement>> = Rc::new(
        sections
            .into_iter()
            .filter_map(|section| section.dyn_into::<HtmlElement>().ok())
            .collect(),
    );
    let window = dom::window()?;
    let listener = Listener::new(&window, "scroll", move |_| {
        let tops: Vec<(String, f64)> = sections
            .iter()
            .map(|section| (section.id(), f64::from(section.offset_top())))
            .collect();
        let current = active_section(dom::scroll_y(), &tops).unwrap_or("");
        let wanted = format!("#{}", current);
        for link in &links {
            let href = link.get_attribute("href").unwrap_or_default();
            link.toggle_class(NAV_ACTIVE, href == wanted);
        }
    })?;
    Ok(Some(listener))
}

pub fn set_current_year(element: &Element) {
    element.set_text(&Local::now().year().to_string());
}

pub fn structured_data() -> serde_json::Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": "KCA Ajira Club",
        "url": "https://kcaajiraclub.ke",
        "logo": "https://kcaajiraclub.ke/img/logo.png",
        "description": "Digital skills and empowerment club for KCA University students",
        "address": {
            "@type": "PostalAddress",
            "streetAddress": "Ruaraka, Thika Road",
            "addressLocality": "Nairobi",
            "addressCountry": "Kenya"
        },
        "memberOf": {
            "@type": "CollegeOrUniversity",
            "name": "KCA University"
        }
    })
}

pub fn inject_structured_data(document: &Document) -> Result<(), BindError> {
    let Some(head) = document.head() else {
        return Ok(());
    };
    let script = document.create_element("script")?;
    script.set_attribute("type", "application/ld+json")?;
    script.set_text(&structured_data().to_string());
    head.append_child(&script)?;
    debug!("Injected organization structured data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<(String, f64)> {
        vec![
            ("home".to_string(), 0.0),
            ("about".to_string(), 700.0),
            ("programs".to_string(), 1_500.0),
        ]
    }

    #[test]
    fn top_of_page_is_home() {
        assert_eq!(active_section(0.0, &sections()), Some("home"));
    }

    #[test]
    fn section_activates_a_little_early() {
        let sections = sections();
        assert_eq!(active_section(599.0, &sections), Some("home"));
        assert_eq!(active_section(600.0, &sections), Some("about"));
        assert_eq!(active_section(5_000.0, &sections), Some("programs"));
    }

    #[test]
    fn no_sections_means_nothing_active() {
        assert_eq!(active_section(300.0, &[]), None);
    }

    #[test]
    fn structured_data_describes_the_club() {
        let data = structured_data();
        assert_eq!(data["@type"], "Organization");
        assert_eq!(data["name"], "KCA Ajira Club");
        assert_eq!(data["address"]["addressLocality"], "Nairobi");
    }
}
