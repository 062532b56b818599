use rand::Rng;

pub const SENTENCE_TERMINATOR: char = '.';

/// Texts need more than this many sentence fragments to be shaped
const MAX_SPOKEN_SENTENCES: usize = 4;
/// ...and at least this many characters
const MIN_SHAPED_LENGTH: usize = 250;
/// Sentences kept from the original text when shaping
const PREAMBLE_SENTENCES: usize = 2;

/// Spoken in place of the remainder of a long answer
pub const REDIRECT_PHRASES: &[&str] = &[
    "The rest of the result has been printed to the chat screen, kindly check it out Ma'am.",
    "The rest of the text is now on the chat screen, Ma'am, please check it.",
    "You can see the rest of the text on the chat screen, Ma'am.",
    "The remaining part of the text is now on the chat screen, Ma'am.",
    "Ma'am, you'll find more text on the chat screen for you to see.",
    "The rest of the answer is now on the chat screen, Ma'am.",
    "Ma'am, please look at the chat screen, the rest of the answer is there.",
    "You'll find the complete answer on the chat screen, Ma'am.",
    "The next part of the text is on the chat screen, Ma'am.",
    "Ma'am, please check the chat screen for more information.",
    "There's more text on the chat screen for you, Ma'am.",
    "Ma'am, take a look at the chat screen for additional text.",
    "You'll find more to read on the chat screen, Ma'am.",
    "Ma'am, check the chat screen for the rest of the text.",
    "The chat screen has the rest of the text, Ma'am.",
    "There's more to see on the chat screen, Ma'am, please look.",
    "Ma'am, the chat screen holds the continuation of the text.",
    "You'll find the complete answer on the chat screen, kindly check it out Ma'am.",
    "Please review the chat screen for the rest of the text, Ma'am.",
    "Ma'am, look at the chat screen for the complete answer.",
];

/// Chooses an index into a phrase pool of the given length
pub trait PhrasePicker: Send {
    fn pick(&mut self, pool_len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl PhrasePicker for RandomPicker {
    fn pick(&mut self, pool_len: usize) -> usize {
        rand::thread_rng().gen_range(0..pool_len)
    }
}

/// Always picks the same index (clamped to the pool)
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl PhrasePicker for FixedPicker {
    fn pick(&mut self, pool_len: usize) -> usize {
        self.0.min(pool_len.saturating_sub(1))
    }
}

pub fn sentence_count(text: &str) -> usize {
    text.split(SENTENCE_TERMINATOR).count()
}

pub fn is_long(text: &str) -> bool {
    sentence_count(text) > MAX_SPOKEN_SENTENCES && text.chars().count() >= MIN_SHAPED_LENGTH
}

pub fn is_redirect_phrase(phrase: &str) -> bool {
    REDIRECT_PHRASES.contains(&phrase)
}

/// Shape with a random redirect phrase
pub fn shape(text: &str) -> String {
    shape_with(text, &mut RandomPicker)
}

/// Long texts become their first two sentences plus a redirect phrase;
/// everything else is returned unchanged.
pub fn shape_with<P: PhrasePicker + ?Sized>(text: &str, picker: &mut P) -> String {
    if !is_long(text) {
        return text.to_string();
    }

    let preamble = text
        .split(SENTENCE_TERMINATOR)
        .take(PREAMBLE_SENTENCES)
        .collect::<Vec<_>>()
        .join(".");
    let phrase = REDIRECT_PHRASES[picker.pick(REDIRECT_PHRASES.len())];

    tracing::debug!(
        original_length = text.len(),
        sentences = sentence_count(text),
        "Long text shaped to preamble and redirect"
    );

    format!("{}{} {}", preamble, SENTENCE_TERMINATOR, phrase)
}
