//! Simulated communication stream
//!
//! Messages are picked at random per invocation; no external text is
//! analysed.

use crate::logic::random::RandomSource;

pub const POSITIVE_MESSAGES: [&str; 5] = [
    "Great work on the project! Really impressed with the progress.",
    "Thanks for your help today, I really appreciate it.",
    "The team meeting went well, everyone contributed great ideas.",
    "Looking forward to collaborating on the new feature.",
    "Excellent presentation, very clear and well-organized.",
];

pub const NEUTRAL_MESSAGES: [&str; 5] = [
    "Meeting scheduled for 3 PM tomorrow.",
    "Please review the document and provide feedback.",
    "The system update will be deployed tonight.",
    "Can you send me the latest version of the report?",
    "Reminder: Deadline for the project is next Friday.",
];

pub const NEGATIVE_MESSAGES: [&str; 10] = [
    "I'm really frustrated with how things are going here.",
    "This is unacceptable, I can't work under these conditions.",
    "I'm done with this place, nothing ever works properly.",
    "This is a complete waste of my time and effort.",
    "I'm seriously considering leaving this company.",
    "The management doesn't care about us at all.",
    "This project is a disaster and going nowhere.",
    "I hate dealing with these constant problems.",
    "Why does everything have to be so difficult here?",
    "I'm fed up with all these unnecessary restrictions.",
];

/// Every canned message, positive first
pub fn all_messages() -> impl Iterator<Item = &'static str> {
    POSITIVE_MESSAGES
        .into_iter()
        .chain(NEUTRAL_MESSAGES)
        .chain(NEGATIVE_MESSAGES)
}

pub fn message_count() -> usize {
    POSITIVE_MESSAGES.len() + NEUTRAL_MESSAGES.len() + NEGATIVE_MESSAGES.len()
}

/// Uniform pick over the whole stream
pub fn pick_message(random: &mut dyn RandomSource) -> &'static str {
    let index = random.pick(message_count());
    all_messages().nth(index).unwrap_or(NEUTRAL_MESSAGES[0])
}
