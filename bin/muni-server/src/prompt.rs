//! Prompt assembly for the completion model.
//!
//! The upstream endpoint is completion-style, not chat-style: the whole
//! conversation is flattened into one labelled transcript, wrapped in a
//! persona template, and closed with a generation cue. Assembly is a pure
//! function of the supplied history; nothing carries over between
//! requests.

use crate::schemas::chat::ChatTurn;

/// Flatten the conversation history into a labelled transcript.
///
/// `turns[0]` is the greeting placeholder and is skipped; the configured
/// greeting is reinserted by [`render_prompt`]. `turns[1]` opens the
/// transcript verbatim with no speaker label, and every later turn is
/// appended as `"\n{label}: {text}"`. A length-2 history therefore yields
/// the opening line exactly, with no trailing newline.
///
/// Returns an empty string when fewer than two turns are supplied; the
/// chat route rejects such requests before calling this.
pub fn transcript(turns: &[ChatTurn]) -> String {
    let mut rest = turns.iter().skip(1);
    let Some(opening) = rest.next() else {
        return String::new();
    };

    let mut out = opening.message.clone();
    for turn in rest {
        out.push('\n');
        out.push_str(turn.who.label());
        out.push_str(": ");
        out.push_str(&turn.message);
    }
    out
}

/// Wrap a transcript in the persona template sent to the model.
///
/// The trailing `AI: ` line is the generation cue; [`stop_labels`] keeps
/// the model from continuing past its own turn.
pub fn render_prompt(persona: &str, greeting: &str, transcript: &str) -> String {
    format!("{persona}\nAI: {greeting}\nUser: {transcript}\nAI: ")
}

/// Stop sequences matching the transcript's speaker labels.
pub fn stop_labels() -> [String; 2] {
    ["AI:".to_owned(), "User:".to_owned()]
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::schemas::chat::Speaker;

    fn turn(who: Speaker, message: &str) -> ChatTurn {
        ChatTurn {
            who,
            message: message.into(),
        }
    }

    #[test]
    fn two_turns_yield_bare_opening_line() {
        let turns = vec![turn(Speaker::Bot, "greeting placeholder"), turn(Speaker::User, "hi")];
        assert_eq!(transcript(&turns), "hi");
    }

    #[test]
    fn later_turns_are_labelled() {
        let turns = vec![
            turn(Speaker::Bot, "placeholder"),
            turn(Speaker::User, "hi"),
            turn(Speaker::Bot, "hello"),
            turn(Speaker::User, "how are you"),
        ];
        assert_eq!(transcript(&turns), "hi\nAI: hello\nUser: how are you");
    }

    #[test]
    fn labels_follow_the_speaker_tag_for_every_turn() {
        let turns = vec![
            turn(Speaker::Bot, "placeholder"),
            turn(Speaker::Bot, "opening"),
            turn(Speaker::User, "a"),
            turn(Speaker::User, "b"),
            turn(Speaker::Bot, "c"),
        ];
        assert_eq!(transcript(&turns), "opening\nUser: a\nUser: b\nAI: c");
    }

    #[test]
    fn assembly_is_deterministic_and_leaves_input_intact() {
        let turns = vec![
            turn(Speaker::Bot, "x"),
            turn(Speaker::User, "a"),
            turn(Speaker::Bot, "b"),
        ];
        let first = transcript(&turns);
        let second = transcript(&turns);
        assert_eq!(first, second);
        assert_eq!(turns[2].message, "b");
    }

    #[test]
    fn short_histories_produce_an_empty_transcript() {
        assert_eq!(transcript(&[]), "");
        assert_eq!(transcript(&[turn(Speaker::Bot, "placeholder")]), "");
    }

    #[test]
    fn template_reinserts_greeting_and_ends_with_the_cue() {
        let rendered = render_prompt("Be kind.", "Hello!", "hi\nAI: hello");
        assert_eq!(rendered, "Be kind.\nAI: Hello!\nUser: hi\nAI: hello\nAI: ");
        assert!(rendered.ends_with("\nAI: "));
    }

    #[test]
    fn stop_labels_match_transcript_labels() {
        assert_eq!(stop_labels(), ["AI:".to_owned(), "User:".to_owned()]);
    }
}
