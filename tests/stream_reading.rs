use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::tempdir;

use cobald::{read_sentences, CobaldError, SentenceReader};

fn token_line(id: &str, word: &str, upos: &str, head: &str, deprel: &str, deps: &str) -> String {
    [
        id, word, word, upos, "_", "_", head, deprel, deps, "_", "Slot", "Class",
    ]
    .join("\t")
}

fn write_corpus(path: &Path, blocks: &[&str]) {
    let mut file = fs::File::create(path).unwrap();
    for block in blocks {
        writeln!(file, "{block}").unwrap();
        writeln!(file).unwrap();
    }
}

fn simple_block(sent_id: &str, words: [&str; 2]) -> String {
    format!(
        "# sent_id = {sent_id}\n# text = {} {}\n{}\n{}",
        words[0],
        words[1],
        token_line("1", words[0], "NOUN", "2", "nsubj", "2:nsubj"),
        token_line("2", words[1], "VERB", "0", "root", "0:root"),
    )
}

#[test]
fn file_streams_one_sentence_per_block() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.conllu");
    write_corpus(
        &path,
        &[
            &simple_block("s1", ["dogs", "bark"]),
            &simple_block("s2", ["cats", "meow"]),
        ],
    );

    let mut stream = SentenceReader::open(&path).unwrap();
    let first = stream.next().unwrap().unwrap();
    assert_eq!(first.sent_id.as_deref(), Some("s1"));
    assert_eq!(first.text.as_deref(), Some("dogs bark"));
    assert_eq!(first.words, vec!["dogs", "bark"]);

    let second = stream.next().unwrap().unwrap();
    assert_eq!(second.sent_id.as_deref(), Some("s2"));
    assert!(stream.next().is_none());
}

#[test]
fn missing_trailing_blank_line_is_tolerated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.conllu");
    fs::write(&path, simple_block("s1", ["dogs", "bark"])).unwrap();

    let sentences = read_sentences(&path).unwrap();
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].sent_id.as_deref(), Some("s1"));
}

#[test]
fn strict_stream_aborts_on_first_invalid_block() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.conllu");
    let broken = format!(
        "# sent_id = s2\n{}\n{}",
        token_line("1", "one", "NUM", "0", "root", "0:root"),
        // Gap in the id sequence.
        token_line("3", "three", "NUM", "1", "nummod", "1:nummod"),
    );
    write_corpus(
        &path,
        &[
            &simple_block("s1", ["dogs", "bark"]),
            &broken,
            &simple_block("s3", ["cats", "meow"]),
        ],
    );

    let mut stream = SentenceReader::open(&path).unwrap();
    assert!(stream.next().unwrap().is_ok());
    let failure = stream.next().unwrap().unwrap_err();
    assert!(matches!(
        failure,
        CobaldError::Sentence(ref err) if err.sent_id == "s2"
    ));
    assert!(stream.next().is_none());

    // The batch helper propagates the same failure.
    assert!(read_sentences(&path).is_err());
}

#[test]
fn parsing_the_same_file_twice_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.conllu");
    write_corpus(
        &path,
        &[
            &simple_block("s1", ["dogs", "bark"]),
            &simple_block("s2", ["cats", "meow"]),
            &simple_block("s3", ["birds", "sing"]),
        ],
    );

    let first = read_sentences(&path).unwrap();
    let second = read_sentences(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn null_and_range_tokens_stream_through() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.conllu");
    let block = format!(
        "# sent_id = s1\n{}\n{}\n{}\n{}",
        "1-2\tdon't\t_\t_\t_\t_\t_\t_\t_\t_\t_\t_",
        token_line("1", "do", "AUX", "2", "aux", "2:aux"),
        token_line("2", "not", "PART", "0", "root", "0:root"),
        "2.1\t#NULL\tdo\tAUX\t_\t_\t_\t_\t2:conj\tellipsis\t_\t_",
    );
    write_corpus(&path, &[&block]);

    let sentences = read_sentences(&path).unwrap();
    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].ids, vec!["1-2", "1", "2", "2.1"]);
    assert_eq!(sentences[0].words[3], "#NULL");
}
