//! Map marker records built from a merged [`LocationSet`].

use maud::html;
use serde::{Deserialize, Serialize};

use super::set::LocationSet;
use super::types::{Label, Location};

/// `[longitude, latitude, label_html]`, the tuple layout map widgets consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker(pub f64, pub f64, pub String);

impl Marker {
    pub fn from_location(loc: &Location) -> Self {
        let html = loc
            .labels
            .iter()
            .map(label_html)
            .collect::<Vec<_>>()
            .join("<br>");
        Marker(loc.lon, loc.lat, html)
    }

    pub fn lon(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }

    pub fn html(&self) -> &str {
        &self.2
    }
}

pub fn markers(set: &LocationSet) -> Vec<Marker> {
    set.iter().map(Marker::from_location).collect()
}

fn label_html(label: &Label) -> String {
    let markup = match label.url.as_deref() {
        Some(url) if !url.is_empty() => html! { a href=(url) { (label.text) } },
        _ => html! { (label.text) },
    };
    markup.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_tuple_is_lon_lat_html() {
        let mut set = LocationSet::new();
        set.add(Location::new(50.087, 14.421, "Castle", Some("http://blog/a")));
        set.add(Location::new(50.088, 14.422, "Square", None));
        set.add(Location::new(49.195, 16.608, "Brno", None));

        let m = markers(&set);
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].lon(), 14.421);
        assert_eq!(m[0].lat(), 50.087);
        assert_eq!(m[0].html(), "<a href=\"http://blog/a\">Castle</a><br>Square");
        assert_eq!(m[1].html(), "Brno");
    }

    #[test]
    fn test_unlinked_label_is_escaped() {
        let loc = Location::new(1.0, 1.0, "<b>Hut</b>", None);
        assert_eq!(Marker::from_location(&loc).html(), "&lt;b&gt;Hut&lt;/b&gt;");
    }

    #[test]
    fn test_marker_json_layout() {
        let json = serde_json::to_string(&Marker(14.5, 50.25, "A".into())).unwrap();
        assert_eq!(json, r#"[14.5,50.25,"A"]"#);
    }

    #[test]
    fn test_label_text_is_escaped() {
        let loc = Location::new(1.0, 1.0, "Tom & Jerry's <hut>", Some("http://x/?a=1&b=\"2\""));
        assert_eq!(
            Marker::from_location(&loc).html(),
            "<a href=\"http://x/?a=1&amp;b=&quot;2&quot;\">Tom &amp; Jerry's &lt;hut&gt;</a>"
        );
    }
}
