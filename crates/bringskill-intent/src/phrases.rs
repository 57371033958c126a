//! Spoken phrase templates per locale.
//!
//! German is the primary language and carries several variants per phrase
//! so repeated interactions do not sound canned.  English is partial: one
//! variant for most phrases.
//!
//! Placeholders: `{items}` in group templates, `{first}`/`{second}` in
//! connectors, `{first}`/`{last}` in the item-list template.  The variants
//! of a group template, its `end` suffixes and its connectors are chosen
//! independently, so every combination must read as a sentence.

use std::str::FromStr;

use serde::Deserialize;

/// The language replies are spoken in.
///
/// Configuration accepts the spellings of [`FromStr`], e.g. `de`, `de-DE`
/// or `english`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Locale {
    #[default]
    De,
    En,
}

impl Locale {
    /// The phrase templates for this locale.
    pub fn phrasebook(self) -> &'static Phrasebook {
        match self {
            Self::De => &DE,
            Self::En => &EN,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "de" | "de_de" | "de-de" | "german" => Ok(Self::De),
            "en" | "en_us" | "en-us" | "en_gb" | "en-gb" | "english" => Ok(Self::En),
            other => Err(format!("unsupported locale `{other}`")),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Templates for a group of one or several items.
#[derive(Debug)]
pub struct GroupPhrase {
    pub one: &'static [&'static str],
    pub multi: &'static [&'static str],
}

/// Templates for an intent whose result splits the spoken items in two
/// groups (e.g. added / already present).
#[derive(Debug)]
pub struct SplitPhrase {
    /// The group the user hoped for (added, removed, found).
    pub first: GroupPhrase,
    /// Appended when there is no second group.
    pub end: &'static [&'static str],
    /// Joins both rendered groups.
    pub connector: &'static [&'static str],
    /// The other group (already present, not on the list, missing).
    pub second: GroupPhrase,
    /// Asked when the intent carried no items.
    pub ask: &'static [&'static str],
}

/// Templates for reading the list aloud.
#[derive(Debug)]
pub struct ReadPhrase {
    pub one: &'static [&'static str],
    pub multi: &'static [&'static str],
    pub none: &'static [&'static str],
}

/// All phrase templates of one locale.
#[derive(Debug)]
pub struct Phrasebook {
    /// Renders several items: `{first}` is the comma-joined head.
    pub list: &'static [&'static str],
    pub add: SplitPhrase,
    pub remove: SplitPhrase,
    pub query: SplitPhrase,
    pub read: ReadPhrase,
    /// Spoken when the shopping-list service cannot be reached.
    pub vendor_unavailable: &'static [&'static str],
    /// Spoken when a message could not be mapped to an intent.
    pub not_understood: &'static [&'static str],
}

pub static DE: Phrasebook = Phrasebook {
    list: &["{first} und {last}"],
    add: SplitPhrase {
        first: GroupPhrase {
            one: &["Ich habe {items}"],
            multi: &["Ich habe {items}"],
        },
        end: &[
            " auf die Einkaufsliste gesetzt.",
            " zur Einkaufsliste hinzugefügt.",
        ],
        connector: &[
            "{first} auf die Liste gesetzt. {second}",
            "{first} hinzugefügt, aber {second}",
        ],
        second: GroupPhrase {
            one: &[
                "{items} steht schon auf der Einkaufsliste.",
                "{items} ist bereits auf der Liste.",
            ],
            multi: &[
                "{items} stehen schon auf der Einkaufsliste.",
                "{items} sind bereits auf der Liste.",
            ],
        },
        ask: &[
            "Was soll ich auf die Einkaufsliste setzen?",
            "Was möchtest du hinzufügen?",
        ],
    },
    remove: SplitPhrase {
        first: GroupPhrase {
            one: &["Ich habe {items}"],
            multi: &["Ich habe {items}"],
        },
        end: &[
            " von der Einkaufsliste gestrichen.",
            " von der Einkaufsliste entfernt.",
        ],
        connector: &[
            "{first} von der Liste gestrichen. {second}",
            "{first} entfernt, aber {second}",
        ],
        second: GroupPhrase {
            one: &[
                "{items} steht nicht auf der Einkaufsliste.",
                "{items} habe ich auf der Liste nicht gefunden.",
            ],
            multi: &[
                "{items} stehen nicht auf der Einkaufsliste.",
                "{items} habe ich auf der Liste nicht gefunden.",
            ],
        },
        ask: &[
            "Was soll ich von der Einkaufsliste streichen?",
            "Was möchtest du entfernen?",
        ],
    },
    query: SplitPhrase {
        first: GroupPhrase {
            one: &["Ja, {items} steht auf der Einkaufsliste", "{items} ist schon drauf"],
            multi: &["Ja, {items} stehen auf der Einkaufsliste", "{items} sind schon drauf"],
        },
        end: &[".", ", du musst nichts mehr hinzufügen."],
        connector: &["{first}. {second}", "{first}, aber {second}"],
        second: GroupPhrase {
            one: &[
                "{items} steht nicht auf der Einkaufsliste.",
                "{items} fehlt noch.",
            ],
            multi: &[
                "{items} stehen nicht auf der Einkaufsliste.",
                "{items} fehlen noch.",
            ],
        },
        ask: &["Wonach soll ich auf der Einkaufsliste schauen?"],
    },
    read: ReadPhrase {
        one: &[
            "Auf deiner Einkaufsliste steht {items}.",
            "Du musst nur {items} kaufen.",
        ],
        multi: &[
            "Auf deiner Einkaufsliste stehen {items}.",
            "Du hast {items} auf deiner Einkaufsliste.",
        ],
        none: &[
            "Deine Einkaufsliste ist leer.",
            "Auf deiner Einkaufsliste steht gerade nichts.",
        ],
    },
    vendor_unavailable: &[
        "Entschuldigung, ich kann die Einkaufsliste gerade nicht erreichen.",
        "Tut mir leid, die Einkaufsliste antwortet gerade nicht. Versuch es später noch einmal.",
    ],
    not_understood: &[
        "Entschuldigung, das habe ich nicht verstanden.",
        "Das kann ich mit der Einkaufsliste leider nicht machen.",
    ],
};

pub static EN: Phrasebook = Phrasebook {
    list: &["{first} and {last}"],
    add: SplitPhrase {
        first: GroupPhrase {
            one: &["I added {items}"],
            multi: &["I added {items}"],
        },
        end: &[" to your shopping list."],
        connector: &["{first} to the list. {second}"],
        second: GroupPhrase {
            one: &["{items} is already on your shopping list."],
            multi: &["{items} are already on your shopping list."],
        },
        ask: &["What should I add to your shopping list?"],
    },
    remove: SplitPhrase {
        first: GroupPhrase {
            one: &["I removed {items}"],
            multi: &["I removed {items}"],
        },
        end: &[" from your shopping list."],
        connector: &["{first} from the list. {second}"],
        second: GroupPhrase {
            one: &["{items} is not on your shopping list."],
            multi: &["{items} are not on your shopping list."],
        },
        ask: &["What should I remove from your shopping list?"],
    },
    query: SplitPhrase {
        first: GroupPhrase {
            one: &["Yes, {items} is on your shopping list"],
            multi: &["Yes, {items} are on your shopping list"],
        },
        end: &["."],
        connector: &["{first}, but {second}"],
        second: GroupPhrase {
            one: &["{items} is not on your shopping list."],
            multi: &["{items} are not on your shopping list."],
        },
        ask: &["What should I look for on your shopping list?"],
    },
    read: ReadPhrase {
        one: &["Your shopping list has {items}."],
        multi: &["Your shopping list has {items}."],
        none: &["Your shopping list is empty."],
    },
    vendor_unavailable: &["Sorry, I can't reach your shopping list right now."],
    not_understood: &["Sorry, I didn't understand that."],
};
