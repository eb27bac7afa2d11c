//! Canned replies used when the remote model is unavailable

const EMERGENCY_KEYWORDS: [&str; 5] = [
    "chest pain",
    "heart attack",
    "can't breathe",
    "stroke",
    "unconscious",
];

const EMERGENCY_REPLY: &str = "🚨 **EMERGENCY SITUATION DETECTED**

**IMMEDIATE ACTION REQUIRED:**
1. Call Emergency Services (911) immediately
2. Do not delay seeking professional medical care
3. Have someone stay with you until help arrives";

const HEADACHE_REPLY: &str = "**Headache Analysis** 🤕

**Common Causes:** Tension, migraine, dehydration, sinus issues

**Recommendations:**
• Rest in a quiet, dark room
• Stay well hydrated
• Use over-the-counter pain relief as directed
• Apply cold compress to forehead

**Seek medical care for:**
- Severe, sudden headache
- Headache with fever or confusion
- Headache after head injury";

const FEVER_REPLY: &str = "**Fever Management** 🌡️

**Recommended Actions:**
• Monitor temperature regularly
• Stay hydrated with water and electrolyte solutions
• Use fever-reducing medication as directed
• Rest and avoid strenuous activities

**Seek Medical Care if:**
- Fever above 103°F (39.4°C)
- Fever lasts more than 3 days
- Accompanied by severe symptoms";

const COUGH_REPLY: &str = "**Cough Relief** 🤧

**Comfort Measures:**
• Use humidifier or steam inhalation
• Stay hydrated to thin mucus
• Use cough drops or lozenges
• Avoid irritants like smoke

**Consult Healthcare Provider if:**
- Cough persists beyond 2 weeks
- Difficulty breathing
- Coughing up blood";

const GENERAL_REPLY: &str = "**Health Guidance** 🏥

Thank you for sharing your health concerns. Based on your description, I recommend:

**General Advice:**
• Monitor your symptoms closely
• Stay hydrated and get adequate rest
• Practice good hygiene

**When to Seek Professional Care:**
• Symptoms worsen or don't improve
• New concerning symptoms develop

**Remember:** This is for informational purposes only. Always consult healthcare professionals for medical advice.";

/// Pick a canned reply for the prompt. Emergency wording is checked first.
pub fn fallback_response(prompt: &str) -> &'static str {
    let lower = prompt.to_lowercase();

    if EMERGENCY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        EMERGENCY_REPLY
    } else if lower.contains("headache") {
        HEADACHE_REPLY
    } else if lower.contains("fever") {
        FEVER_REPLY
    } else if lower.contains("cough") {
        COUGH_REPLY
    } else {
        GENERAL_REPLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_wins() {
        assert_eq!(fallback_response("Headache and CHEST PAIN"), EMERGENCY_REPLY);
        assert_eq!(fallback_response("I can't breathe"), EMERGENCY_REPLY);
    }

    #[test]
    fn test_topic_order() {
        assert_eq!(fallback_response("fever and headache"), HEADACHE_REPLY);
        assert_eq!(fallback_response("cough with fever"), FEVER_REPLY);
        assert_eq!(fallback_response("dry cough"), COUGH_REPLY);
    }

    #[test]
    fn test_general_guidance() {
        let reply = fallback_response("");
        assert!(reply.contains("informational purposes only"));
    }
}
