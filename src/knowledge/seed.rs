//! Built-in disease records loaded when `knowledge.builtin = true`.

use super::KnowledgeEntry;

struct Seed {
    name: &'static str,
    description: &'static str,
    symptoms: &'static [&'static str],
    prevention: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        name: "malaria",
        description: "Malaria is a life-threatening infectious disease caused by Plasmodium parasites, transmitted by Anopheles mosquitoes.",
        symptoms: &["Fever", "Chills", "Headache", "Sweating", "Nausea"],
        prevention: &["Use insecticide-treated nets", "Take antimalarial drugs when prescribed", "Avoid mosquito bites"],
    },
    Seed {
        name: "dengue",
        description: "Dengue is a mosquito-borne viral infection causing high fever, severe headache, pain behind the eyes, joint pain and rash.",
        symptoms: &["High fever", "Severe headache", "Joint and muscle pain", "Rash"],
        prevention: &["Avoid mosquito bites", "Remove standing water", "Use repellents and nets"],
    },
    Seed {
        name: "jock itch",
        description: "Jock itch (tinea cruris) is a fungal infection of the groin area causing itchy, red, ring-shaped rashes.",
        symptoms: &["Itchy groin rash", "Redness", "Scaling"],
        prevention: &["Keep the area dry", "Use antifungal powders", "Avoid tight clothing"],
    },
    Seed {
        name: "diarrhea",
        description: "Diarrhea (loose motions) involves frequent watery stools, often caused by infections or contaminated food/water. The main risk is dehydration.",
        symptoms: &["Loose stools", "Abdominal cramps", "Dehydration"],
        prevention: &["Oral rehydration solutions (ORS)", "Safe drinking water", "Hand hygiene"],
    },
    Seed {
        name: "covid-19",
        description: "COVID-19 is an infectious disease caused by the SARS-CoV-2 virus, affecting the respiratory tract and sometimes other organs.",
        symptoms: &["Fever", "Cough", "Loss of smell/taste", "Shortness of breath"],
        prevention: &["Vaccination", "Masking in crowded places", "Hand hygiene"],
    },
    Seed {
        name: "pink eye",
        description: "Conjunctivitis (pink eye) is inflammation of the conjunctiva due to viruses, bacteria or allergies, causing red eye and discharge.",
        symptoms: &["Redness", "Discharge", "Itching"],
        prevention: &["Avoid touching eyes", "Hand hygiene", "See doctor if vision changes"],
    },
    Seed {
        name: "typhoid",
        description: "Typhoid fever is an infection by Salmonella Typhi, spread through contaminated food or water, causing prolonged fever and systemic illness.",
        symptoms: &["High fever", "Stomach pain", "Headache", "Weakness"],
        prevention: &["Safe water and food", "Hand hygiene", "Vaccination in high-risk areas"],
    },
    Seed {
        name: "stomach flu",
        description: "Gastroenteritis (stomach flu) causes vomiting, diarrhea and abdominal cramps often due to viral or bacterial infections.",
        symptoms: &["Nausea", "Vomiting", "Diarrhea", "Abdominal cramps"],
        prevention: &["Hydration", "Safe food handling", "Hand hygiene"],
    },
    Seed {
        name: "asthma",
        description: "Asthma is a chronic lung condition causing wheeze, breathlessness and chest tightness; managed with inhalers and trigger avoidance.",
        symptoms: &["Wheezing", "Shortness of breath", "Chest tightness"],
        prevention: &["Use prescribed inhalers", "Avoid triggers", "Regular follow-ups"],
    },
];

/// The seed records in their fixed insertion order.
pub fn builtin() -> Vec<KnowledgeEntry> {
    SEEDS
        .iter()
        .map(|s| KnowledgeEntry {
            name: s.name.to_string(),
            description: s.description.to_string(),
            symptoms: s.symptoms.iter().map(|x| x.to_string()).collect(),
            prevention: s.prevention.iter().map(|x| x.to_string()).collect(),
        })
        .collect()
}
