//! Static emergency preparedness guide

/// First-aid protocol for one emergency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protocol {
    pub name: &'static str,
    pub symptoms: &'static [&'static str],
    pub actions: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub service: &'static str,
    pub number: &'static str,
}

pub const PROTOCOLS: [Protocol; 3] = [
    Protocol {
        name: "Heart Attack",
        symptoms: &["Chest pain", "Shortness of breath", "Pain in arms", "Nausea", "Cold sweat"],
        actions: &["Call 911 immediately", "Chew aspirin if available", "Stay calm and rest"],
    },
    Protocol {
        name: "Stroke (FAST)",
        symptoms: &["Face drooping", "Arm weakness", "Speech difficulty"],
        actions: &["Call 911 immediately", "Note time symptoms started", "Do NOT give food/drink"],
    },
    Protocol {
        name: "Severe Allergy",
        symptoms: &["Difficulty breathing", "Swelling face/throat", "Hives", "Dizziness"],
        actions: &["Use epinephrine if available", "Call 911", "Lie down with feet elevated"],
    },
];

pub const CONTACTS: [Contact; 3] = [
    Contact {
        service: "Emergency Services",
        number: "911",
    },
    Contact {
        service: "Poison Control",
        number: "1-800-222-1222",
    },
    Contact {
        service: "Mental Health Crisis",
        number: "988",
    },
];

pub const EMERGENCY_KIT: [&str; 6] = [
    "Bandages",
    "Gauze",
    "Antiseptic",
    "Thermometer",
    "Pain relievers",
    "Emergency blanket",
];

/// Protocol whose name starts with the given text, ignoring case
pub fn find_protocol(name: &str) -> Option<&'static Protocol> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    PROTOCOLS
        .iter()
        .find(|p| p.name.to_lowercase().starts_with(&wanted))
}
