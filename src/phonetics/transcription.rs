use super::lexicon::Lexicon;

/// IPA rendering of a word plus the positions of primary-stressed phones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    pub ipa: String,
    pub stress_positions: Vec<usize>,
}

/// Transcribe a word into IPA.
///
/// Phones come from the lexicon when it knows the word, otherwise from a
/// per-letter grapheme estimate. Lexicon phones carry ARPABET stress digits;
/// a trailing `1` marks primary stress. Characters outside the tables pass
/// through verbatim, so non-alphabetic input still produces a transcription.
pub fn transcribe(word: &str, lexicon: Option<&Lexicon>) -> Transcription {
    let word = word.to_lowercase();

    let phones: Vec<String> = match lexicon.and_then(|lex| lex.phones(&word)) {
        Some(known) => known.to_vec(),
        None => grapheme_phones(&word),
    };

    let mut ipa = String::new();
    let mut stress_positions = Vec::new();

    for (idx, phone) in phones.iter().enumerate() {
        let (base, stress) = split_stress(phone);
        if stress == Some('1') {
            stress_positions.push(idx);
        }
        match arpabet_to_ipa(base) {
            Some(mapped) => ipa.push_str(mapped),
            None => ipa.push_str(base),
        }
    }

    Transcription {
        ipa,
        stress_positions,
    }
}

/// Rough letter-by-letter phone estimate for words missing from the lexicon.
fn grapheme_phones(word: &str) -> Vec<String> {
    let mut phones = Vec::new();
    for ch in word.chars() {
        match letter_phones(ch) {
            Some(mapped) => phones.extend(mapped.iter().map(|p| p.to_string())),
            None => phones.push(ch.to_string()),
        }
    }
    phones
}

fn letter_phones(ch: char) -> Option<&'static [&'static str]> {
    let phones: &[&str] = match ch {
        'a' => &["AE"],
        'b' => &["B"],
        'c' => &["K"],
        'd' => &["D"],
        'e' => &["EH"],
        'f' => &["F"],
        'g' => &["G"],
        'h' => &["HH"],
        'i' => &["IH"],
        'j' => &["JH"],
        'k' => &["K"],
        'l' => &["L"],
        'm' => &["M"],
        'n' => &["N"],
        'o' => &["AO"],
        'p' => &["P"],
        'q' => &["K"],
        'r' => &["R"],
        's' => &["S"],
        't' => &["T"],
        'u' => &["AH"],
        'v' => &["V"],
        'w' => &["W"],
        'x' => &["K", "S"],
        'y' => &["Y"],
        'z' => &["Z"],
        _ => return None,
    };
    Some(phones)
}

fn arpabet_to_ipa(phone: &str) -> Option<&'static str> {
    let ipa = match phone {
        "AA" => "ɑ",
        "AE" => "æ",
        "AH" => "ə",
        "AO" => "ɔ",
        "AW" => "aʊ",
        "AY" => "aɪ",
        "B" => "b",
        "CH" => "tʃ",
        "D" => "d",
        "DH" => "ð",
        "EH" => "ɛ",
        "ER" => "ɝ",
        "EY" => "eɪ",
        "F" => "f",
        "G" => "ɡ",
        "HH" => "h",
        "IH" => "ɪ",
        "IY" => "i",
        "JH" => "dʒ",
        "K" => "k",
        "L" => "l",
        "M" => "m",
        "N" => "n",
        "NG" => "ŋ",
        "OW" => "oʊ",
        "OY" => "ɔɪ",
        "P" => "p",
        "R" => "r",
        "S" => "s",
        "SH" => "ʃ",
        "T" => "t",
        "TH" => "θ",
        "UH" => "ʊ",
        "UW" => "u",
        "V" => "v",
        "W" => "w",
        "Y" => "j",
        "Z" => "z",
        _ => return None,
    };
    Some(ipa)
}

fn split_stress(phone: &str) -> (&str, Option<char>) {
    match phone.chars().last() {
        Some(digit @ ('0' | '1' | '2')) => (&phone[..phone.len() - 1], Some(digit)),
        _ => (phone, None),
    }
}
