//! Assessment checklist shown on the interactive review page.
//!
//! Items are either plain text or a run of rich segments, and may carry an
//! inline widget rendered right after the text.

use serde::Serialize;

/// Inline piece of a rich item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text { text: &'static str },
    Link { href: &'static str, label: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ItemBody {
    Plain(&'static str),
    Rich(&'static [Segment]),
}

impl ItemBody {
    /// Text with link labels inlined.
    pub fn plain_text(&self) -> String {
        match self {
            ItemBody::Plain(text) => text.to_string(),
            ItemBody::Rich(segments) => segments
                .iter()
                .map(|s| match s {
                    Segment::Text { text } => *text,
                    Segment::Link { label, .. } => *label,
                })
                .collect(),
        }
    }

    pub fn links(&self) -> Vec<&'static str> {
        match self {
            ItemBody::Plain(_) => Vec::new(),
            ItemBody::Rich(segments) => segments
                .iter()
                .filter_map(|s| match s {
                    Segment::Link { href, .. } => Some(*href),
                    Segment::Text { .. } => None,
                })
                .collect(),
        }
    }
}

/// Widget rendered after an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    /// Attention marker
    PulsingBall,
    /// Button that opens a modal
    ModalButton {
        label: &'static str,
        title: &'static str,
        body: &'static str,
    },
    /// Row of navigation links
    NavLinks { links: &'static [Segment] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub body: ItemBody,
    pub widget: Option<Widget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub items: &'static [ChecklistItem],
}

pub const CHECKLIST: &[Section] = &[
    Section {
        title: "Struktur",
        items: &[
            ChecklistItem {
                body: ItemBody::Plain("Minst 3 sidor"),
                widget: None,
            },
            ChecklistItem {
                body: ItemBody::Rich(&[
                    Segment::Text { text: "En " },
                    Segment::Link { href: "/", label: "startsida" },
                    Segment::Text {
                        text: " med presentation (om dig, företaget, idén eller projektet).",
                    },
                ]),
                widget: None,
            },
            ChecklistItem {
                body: ItemBody::Rich(&[
                    Segment::Text { text: "En " },
                    Segment::Link {
                        href: "/komplettering/galleri",
                        label: "gallerisida",
                    },
                    Segment::Text {
                        text: " eller projektsida som visar minst fem olika inlägg, projekt eller exempel.",
                    },
                ]),
                widget: None,
            },
            ChecklistItem {
                body: ItemBody::Rich(&[
                    Segment::Link {
                        href: "#checkpoint",
                        label: "En sida",
                    },
                    Segment::Text {
                        text: " där användaren kan fylla och spara information (lagring i localStorage).",
                    },
                ]),
                widget: None,
            },
        ],
    },
    Section {
        title: "Funktionalitet",
        items: &[
            ChecklistItem {
                body: ItemBody::Plain(
                    "Minst fem interaktiva funktioner (t.ex. klick, filter, formulärinmatning, dynamiskt innehåll, feedback), implementerade med hjälp av JavaScript.",
                ),
                widget: Some(Widget::PulsingBall),
            },
            ChecklistItem {
                body: ItemBody::Plain(
                    "Tydlig visuell återkoppling vid användarens handlingar. Exempel: en bekräftelse när användaren sparar information eller skickar ett formulär.",
                ),
                widget: Some(Widget::ModalButton {
                    label: "Klicka mig",
                    title: "Du klickade på knappen!",
                    body: "Bara så du vet.",
                }),
            },
            ChecklistItem {
                body: ItemBody::Plain(
                    "Navigeringen mellan olika sidor på webbplatsen ska vara konsekvent och intuitiv.",
                ),
                widget: Some(Widget::NavLinks {
                    links: &[
                        Segment::Link {
                            href: "/",
                            label: "Startsida",
                        },
                        Segment::Link {
                            href: "/komplettering/galleri",
                            label: "Gallerisida",
                        },
                    ],
                }),
            },
        ],
    },
    Section {
        title: "Kod och arkitektur",
        items: &[
            ChecklistItem {
                body: ItemBody::Plain("Webbplatsen ska byggas med React och Next.js."),
                widget: None,
            },
            ChecklistItem {
                body: ItemBody::Plain(
                    "Visa förståelse för komponentbaserad utveckling och dataflöden via props och state.",
                ),
                widget: None,
            },
            ChecklistItem {
                body: ItemBody::Plain(
                    "Koden ska vara läsbar, strukturerad och kommenterad där det behövs.",
                ),
                widget: None,
            },
        ],
    },
    Section {
        title: "Design och layout",
        items: &[
            ChecklistItem {
                body: ItemBody::Rich(&[
                    Segment::Text {
                        text: "Webbplatsen ska vara mobilanpassad med ",
                    },
                    Segment::Link {
                        href: "#media-queries",
                        label: "@media-queries",
                    },
                    Segment::Text { text: "." },
                ]),
                widget: None,
            },
            ChecklistItem {
                body: ItemBody::Plain(
                    "Layout och färgval ska stödja innehållet och användarupplevelsen.",
                ),
                widget: None,
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_in_order() {
        let titles: Vec<_> = CHECKLIST.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            ["Struktur", "Funktionalitet", "Kod och arkitektur", "Design och layout"]
        );
        let counts: Vec<_> = CHECKLIST.iter().map(|s| s.items.len()).collect();
        assert_eq!(counts, [4, 3, 3, 2]);
    }

    #[test]
    fn rich_items_keep_links() {
        let gallery = CHECKLIST[0].items[2].body;
        assert_eq!(gallery.links(), vec!["/komplettering/galleri"]);
        assert!(gallery.plain_text().starts_with("En gallerisida eller"));

        let anchor = CHECKLIST[3].items[0].body;
        assert_eq!(anchor.links(), vec!["#media-queries"]);
        assert_eq!(
            anchor.plain_text(),
            "Webbplatsen ska vara mobilanpassad med @media-queries."
        );
    }

    #[test]
    fn widgets_only_under_functionality() {
        for (idx, section) in CHECKLIST.iter().enumerate() {
            let with_widget = section.items.iter().filter(|i| i.widget.is_some()).count();
            if idx == 1 {
                assert_eq!(with_widget, section.items.len());
            } else {
                assert_eq!(with_widget, 0);
            }
        }
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(CHECKLIST[0].items[1]).unwrap();
        assert_eq!(json["body"]["kind"], "rich");
        assert_eq!(json["body"]["value"][1]["kind"], "link");
        assert_eq!(json["body"]["value"][1]["href"], "/");
        assert!(json["widget"].is_null());

        let json = serde_json::to_value(CHECKLIST[1].items[1].widget).unwrap();
        assert_eq!(json["kind"], "modal_button");
        assert_eq!(json["label"], "Klicka mig");
    }
}
