//! Built-in English contraction tables.
//!
//! Derived from Wikipedia's list of English contractions. Forms marked
//! `strict` keep a mandatory apostrophe because their bare spelling is a
//! common word.

use super::Form;

const fn loose(text: &'static str) -> Form {
    Form::loose(text)
}

const fn strict(text: &'static str) -> Form {
    Form::strict(text)
}

pub(super) const UNAMBIGUOUS: &[(Form, &str)] = &[
    (loose("can't"), "cannot"),
    (loose("can't've"), "cannot have"),
    (strict("'cause"), "because"),
    (loose("could've"), "could have"),
    (loose("couldn't"), "could not"),
    (loose("couldn't've"), "could not have"),
    (loose("didn't"), "did not"),
    (loose("doesn't"), "does not"),
    (loose("don't"), "do not"),
    (loose("doin'"), "doing"),
    (loose("gimme"), "give me"),
    (loose("goin'"), "going"),
    (loose("gonna"), "going to"),
    (loose("hadn't"), "had not"),
    (loose("hadn't've"), "had not have"),
    (loose("hasn't"), "has not"),
    (loose("haven't"), "have not"),
    (loose("he'd've"), "he would have"),
    (loose("how'd"), "how did"),
    (loose("how'd'y"), "how do you"),
    (loose("how'll"), "how will"),
    (loose("I'd've"), "I would have"),
    // Also rewrites the chat abbreviation "im".
    (loose("I'm"), "I am"),
    (loose("I've"), "I have"),
    (loose("isn't"), "is not"),
    (loose("it'd've"), "it would have"),
    (strict("let's"), "let us"),
    (loose("ma'am"), "madam"),
    (loose("mayn't"), "may not"),
    (loose("might've"), "might have"),
    (loose("mightn't"), "might not"),
    (loose("mightn't've"), "might not have"),
    (loose("must've"), "must have"),
    (loose("mustn't"), "must not"),
    (loose("mustn't've"), "must not have"),
    (loose("nothin'"), "nothing"),
    (loose("needn't"), "need not"),
    (loose("needn't've"), "need not have"),
    (loose("o'clock"), "of the clock"),
    (loose("oughtn't"), "ought not"),
    (loose("oughtn't've"), "ought not have"),
    (loose("shan't"), "shall not"),
    (loose("sha'n't"), "shall not"),
    (loose("shan't've"), "shall not have"),
    (loose("she'd've"), "she would have"),
    (loose("should've"), "should have"),
    (loose("shouldn't"), "should not"),
    (loose("shouldn't've"), "should not have"),
    (loose("so've"), "so have"),
    (loose("somethin'"), "something"),
    (loose("that'd've"), "that would have"),
    (loose("there'd've"), "there would have"),
    (loose("they'd've"), "they would have"),
    (loose("they're"), "they are"),
    (loose("they've"), "they have"),
    (loose("to've"), "to have"),
    (loose("wasn't"), "was not"),
    (loose("we'd've"), "we would have"),
    (strict("we'll"), "we will"),
    (loose("we'll've"), "we will have"),
    (strict("we're"), "we are"),
    (loose("we've"), "we have"),
    (loose("weren't"), "were not"),
    (loose("what're"), "what are"),
    (loose("what've"), "what have"),
    (loose("when've"), "when have"),
    (loose("where'd"), "where did"),
    (loose("where've"), "where have"),
    (loose("who've"), "who have"),
    (loose("why've"), "why have"),
    (loose("will've"), "will have"),
    (loose("won't"), "will not"),
    (loose("won't've"), "will not have"),
    (loose("would've"), "would have"),
    (loose("wouldn't"), "would not"),
    (loose("wouldn't've"), "would not have"),
    (loose("y'all"), "you all"),
    (loose("y'all'd"), "you all would"),
    (loose("y'all'd've"), "you all would have"),
    (loose("y'all're"), "you all are"),
    (loose("y'all've"), "you all have"),
    (loose("you'd've"), "you would have"),
    (loose("you're"), "you are"),
    (loose("you've"), "you have"),
];

// Longer forms precede any shorter form that matches inside them.
pub(super) const AMBIGUOUS: &[(Form, &[&str])] = &[
    (
        loose("ain't"),
        &["am not", "are not", "is not", "has not", "have not"],
    ),
    (loose("aren't"), &["are not", "am not"]),
    (loose("he'd"), &["he had", "he would"]),
    (loose("he'll've"), &["he shall have", "he will have"]),
    (strict("he'll"), &["he shall", "he will"]),
    (loose("he's"), &["he has", "he is"]),
    (loose("how's"), &["how has", "how is", "how does"]),
    (strict("I'd"), &["I had", "I would"]),
    (loose("I'll've"), &["I shall have", "I will have"]),
    (strict("I'll"), &["I shall", "I will"]),
    (loose("it'd"), &["it had", "it would"]),
    (loose("it'll've"), &["it shall have", "it will have"]),
    (loose("it'll"), &["it shall", "it will"]),
    (strict("it's"), &["it has", "it is"]),
    (strict("she'd"), &["she had", "she would"]),
    (loose("she'll've"), &["she shall have", "she will have"]),
    (strict("she'll"), &["she shall", "she will"]),
    (loose("she's"), &["she has", "she is"]),
    // Also rewrites "sos".
    (loose("so's"), &["so as", "so is"]),
    (loose("that'd"), &["that would", "that had"]),
    (loose("that's"), &["that has", "that is"]),
    (loose("there'd"), &["there had", "there would"]),
    (loose("there's"), &["there has", "there is"]),
    (loose("they'd"), &["they had", "they would"]),
    (loose("they'll've"), &["they shall have", "they will have"]),
    (loose("they'll"), &["they shall", "they will"]),
    (strict("we'd"), &["we had", "we would"]),
    (loose("what'll've"), &["what shall have", "what will have"]),
    (loose("what'll"), &["what shall", "what will"]),
    (loose("what's"), &["what has", "what is"]),
    (loose("when's"), &["when has", "when is"]),
    (loose("where's"), &["where has", "where is"]),
    (loose("who'll've"), &["who shall have", "who will have"]),
    (loose("who'll"), &["who shall", "who will"]),
    (loose("who's"), &["who has", "who is"]),
    (loose("why's"), &["why has", "why is"]),
    (loose("you'd"), &["you had", "you would"]),
    (loose("you'll've"), &["you shall have", "you will have"]),
    (loose("you'll"), &["you shall", "you will"]),
];

pub(super) const REVERSE: &[(&str, &str)] = &[
    ("are not", "aren't"),
    ("cannot", "can't"),
    ("could have", "could've"),
    ("could not", "couldn't"),
    ("did not", "didn't"),
    ("does not", "doesn't"),
    ("do not", "don't"),
    ("got to", "gotta"),
    ("had not", "hadn't"),
    ("has not", "hasn't"),
    ("have not", "haven't"),
    ("he had", "he'd"),
    ("he would", "he'd"),
    ("he shall", "he'll"),
    ("he will", "he'll"),
    ("he has", "he's"),
    ("he is", "he's"),
    ("how did", "how'd"),
    ("how would", "how'd"),
    ("how will", "how'll"),
    ("how has", "how's"),
    ("how is", "how's"),
    ("how does", "how's"),
    ("I had", "I'd"),
    ("I would", "I'd"),
    ("I shall", "I'll"),
    ("I will", "I'll"),
    ("I am", "I'm"),
    ("I have", "I've"),
    ("is not", "isn't"),
    ("it would", "it'd"),
    ("it shall", "it'll"),
    ("it will", "it'll"),
    ("it has", "it's"),
    ("it is", "it's"),
    ("may have", "may've"),
    ("might not", "mightn't"),
    ("might have", "might've"),
    ("must not", "mustn't"),
    ("must have", "must've"),
    ("need not", "needn't"),
    ("of the clock", "o'clock"),
    ("ought not", "oughtn't"),
    ("shall not", "shan't"),
    ("she had", "she'd"),
    ("she would", "she'd"),
    ("she shall", "she'll"),
    ("she will", "she'll"),
    ("she has", "she's"),
    ("she is", "she's"),
    ("should have", "should've"),
    ("should not", "shouldn't"),
    ("somebody has", "somebody's"),
    ("somebody is", "somebody's"),
    ("someone has", "someone's"),
    ("someone is", "someone's"),
    ("something has", "something's"),
    ("something is", "something's"),
    ("that shall", "that'll"),
    ("that will", "that'll"),
    ("that are", "that're"),
    ("that has", "that's"),
    ("that is", "that's"),
    ("that would", "that'd"),
    ("that had", "that'd"),
    ("there had", "there'd"),
    ("there would", "there'd"),
    ("there are", "there're"),
    ("there has", "there's"),
    ("there is", "there's"),
    ("these are", "these're"),
    ("they had", "they'd"),
    ("they would", "they'd"),
    ("they shall", "they'll"),
    ("they will", "they'll"),
    ("they are", "they're"),
    ("they have", "they've"),
    ("this has", "this's"),
    ("this is", "this's"),
    ("those are", "those're"),
    ("was not", "wasn't"),
    ("we had", "we'd"),
    ("we would", "we'd"),
    ("we would have", "we'd've"),
    ("we will", "we'll"),
    ("we are", "we're"),
    ("we have", "we've"),
    ("were not", "weren't"),
    ("what did", "what'd"),
    ("what shall", "what'll"),
    ("what will", "what'll"),
    ("what are", "what're"),
    ("what has", "what's"),
    ("what is", "what's"),
    ("what does", "what's"),
    ("what have", "what've"),
    ("when has", "when's"),
    ("when is", "when's"),
    ("where did", "where'd"),
    ("where are", "where're"),
    ("where has", "where's"),
    ("where is", "where's"),
    ("where does", "where's"),
    ("where have", "where've"),
    ("which has", "which's"),
    ("which is", "which's"),
    ("who would", "who'd"),
    ("who had", "who'd"),
    ("who did", "who'd"),
    ("who would have", "who'd've"),
    ("who shall", "who'll"),
    ("who will", "who'll"),
    ("who are", "who're"),
    ("who has", "who's"),
    ("who is", "who's"),
    ("who does", "who's"),
    ("who have", "who've"),
    ("why did", "why'd"),
    ("why are", "why're"),
    ("why has", "why's"),
    ("why is", "why's"),
    ("why does", "why's"),
    ("will not", "won't"),
    ("would have", "would've"),
    ("would not", "wouldn't"),
    ("you had", "you'd"),
    ("you would", "you'd"),
    ("you shall", "you'll"),
    ("you will", "you'll"),
    ("you are", "you're"),
    ("you have", "you've"),
];
