//! Phrase tables for the NPC.
//!
//! The built-in tables are the NPC's whole personality. A TOML file with
//! the same shape can replace any subset of them at start-up; missing
//! sections keep their built-in values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use giken_core::error::{GikenError, Result};

use crate::keywords::KeywordTable;
use crate::mood::Mood;
use crate::sentiment::Sentiment;

// =============================================================================
// Built-in phrases
// =============================================================================

const POSITIVE_WORDS: &[&str] = &["うれしい", "楽しい", "最高", "幸せ", "ワクワク"];
const NEGATIVE_WORDS: &[&str] = &["悲しい", "辛い", "苦しい", "しんどい", "寂しい"];

const HAPPY_LINES: &[&str] = &[
    "今日は特に嬉しい気分だよ！",
    "なんだか笑顔になっちゃうね～",
    "ハッピーな気持ちが伝わってくる！",
];
const PLAYFUL_LINES: &[&str] = &[
    "ちょっとお茶目な気分なの♪",
    "ふふ、遊び心が溢れてるよ！",
    "冗談も交えちゃおうかな～",
];
const THOUGHTFUL_LINES: &[&str] = &[
    "うーん、色々考えさせられるなぁ。",
    "ふむ、しっかり考えてるよ。",
    "深い話になると心がざわつくね。",
];
const SERIOUS_LINES: &[&str] = &[
    "これは大事な話だね…",
    "真面目に向き合わなきゃいけないね。",
    "しっかり考えないと。",
];
const EXCITED_LINES: &[&str] = &[
    "ワクワクするね！",
    "興奮しちゃう！今日のエネルギーがすごいよ！",
    "エキサイトしすぎて、止まらないかも！",
];

const POSITIVE_LINES: &[&str] = &[
    "あなたの明るさに私も元気をもらっちゃう！",
    "そのポジティブさ、素敵だよ！",
    "いい雰囲気だね、もっと笑って！",
];
const NEGATIVE_LINES: &[&str] = &[
    "大丈夫？無理しないでね、私がついてるよ。",
    "辛いときはゆっくり休むのも大事だよ。",
    "あなたの気持ち、しっかり受け止めるからね。",
];

const KEYWORDS: &[(&str, &[&str])] = &[
    (
        "hello",
        &[
            "やっほー、元気？",
            "こんにちは♪ 会えてうれしいよ～",
            "こんちは～。調子どう？",
            "あいさつって大事だよね！",
        ],
    ),
    (
        "morning",
        &[
            "おはよう！ちゃんと目覚めた？",
            "朝ごはんはしっかり食べた？",
            "まだ眠そうだけど、今日も頑張ろう！",
            "朝の空気って最高だよね～",
        ],
    ),
    (
        "goodbye",
        &[
            "もう行っちゃうの？さみしいな～",
            "またね！次も楽しみにしてるよ～",
            "バイバイは寂しいけど、またね～",
            "今度はもっとゆっくり話そうね",
        ],
    ),
    (
        "food",
        &[
            "お腹すいたね～、何か美味しいもの食べたいな",
            "絶品スイーツにハマってるんだ～",
            "ラーメンとかカレーとか、ガツンと行きたいよね～",
            "食べ物の話って尽きないよね～",
        ],
    ),
    (
        "sleep",
        &[
            "眠いときはしっかり休むのが一番だよね",
            "夜更かしはほどほどにね",
            "私もそろそろ夢の中に行きたくなっちゃうなぁ",
            "寝る前にお話しするのもいいよね",
        ],
    ),
    (
        "love",
        &[
            "恋バナ！？それは盛り上がるね～",
            "好きな人のこと、もっと聞かせてよ",
            "胸がキュンってする瞬間ってあるよね…",
            "恋って難しいけど素敵だよね",
        ],
    ),
    (
        "hate",
        &[
            "嫌いなことって誰にでもあるよね",
            "でも無理に嫌う必要はないと思うな",
            "そういうときはリラックスするのもいいかもね",
            "分かるよ、その気持ち…でも少し休んでみたら？",
        ],
    ),
    (
        "music",
        &[
            "最近どんな音楽聴いてる？オススメあったら教えて！",
            "音楽の力ってすごいよね、心にしみる～",
            "ライブに行くと盛り上がるよね！",
            "私も思わず口ずさんじゃう時があるの",
        ],
    ),
    (
        "help",
        &[
            "どうしたの？何か困ってる？",
            "SOSなら、遠慮なく言ってね～",
            "手伝えることがあれば何でも言って！",
            "大丈夫？一緒に乗り越えようよ",
        ],
    ),
    (
        "game",
        &[
            "ゲーム大好き！最近ハマってるのは何？",
            "アクション？RPG？パズル？いろいろあるよね",
            "一緒にプレイできたら面白そうだね～",
            "ゲームの話、もっと聞かせてよ",
        ],
    ),
    (
        "travel",
        &[
            "どこか行きたい場所あるの？旅の話って楽しいよね",
            "非日常を感じられる場所って最高だよね～",
            "海外でも国内でも、素敵な場所はたくさんあるよ",
            "旅行の計画とか、ワクワクするよね",
        ],
    ),
    (
        "work",
        &[
            "お仕事お疲れ様！無理しないでね",
            "忙しいときこそ、しっかり休息を取ってね",
            "仕事の話、聞いてみたいな～",
            "一息ついたらまた元気出せるはずだよ",
        ],
    ),
    (
        "study",
        &[
            "勉強頑張ってるんだね、えらいよ～",
            "知識は本当に力になるよね",
            "集中できる環境って大事だよね～",
            "たまには息抜きも必要だよ、リラックスして",
        ],
    ),
    (
        "anime",
        &[
            "最近のアニメ、めちゃくちゃ面白いよね～",
            "推しキャラの話、もっと聞かせてよ！",
            "アニメの世界に入り込むって素敵だよね",
            "私もアニメにハマってるんだ～",
        ],
    ),
    (
        "movie",
        &[
            "映画って感動するよね、涙が出ちゃうこともあるし",
            "ジャンル問わず、いい映画は心に残るよね",
            "最近観た映画でオススメある？",
            "映画館で観るとより一層楽しめる気がするな",
        ],
    ),
    (
        "hobby",
        &[
            "趣味の話って盛り上がるよね、もっと教えて！",
            "新しい趣味を見つけるのってワクワクするよね",
            "いろんな趣味に挑戦するの、素敵だと思うな～",
            "私も最近、新しいこと始めたくなっちゃう",
        ],
    ),
    (
        "exercise",
        &[
            "運動すると気分爽快だよね、無理せずにね",
            "健康のためにも、少し動くのは大事だよね",
            "どんなスポーツが好き？教えてほしいな",
            "身体を動かすと心も軽くなる気がするな",
        ],
    ),
    (
        "weather",
        &[
            "今日は天気どう？晴れならお出かけしたくなるね",
            "雨の日は家でゆっくりするのもいいよね",
            "台風とか大丈夫？気をつけてね",
            "季節の変わり目って何か感じるよね",
        ],
    ),
];

const FALLBACK_LINES: &[&str] = &[
    "ふーん、そうなんだ？",
    "なかなか面白いね、もっと聞かせてよ。",
    "うーん、どういう意味かな？",
    "それって、ちょっと気になるなぁ",
    "えっと、なるほどね…",
    "そういう話、面白いね！",
];

const ELABORATE_LINE: &str = "あのー、もう少し詳しく教えてくれたら嬉しいな～";

const HESITATION_LINES: &[&str] = &[
    "うーん、そう思うんだよね。",
    "実は私も似たような経験あるの。",
    "それ、ちょっと考えさせられるなぁ。",
    "ふふ、あなたって面白いね～。",
    "えっと、どう答えたらいいか…",
];

const QUESTION_FOLLOWUPS: &[&str] = &[
    "どうしてそう思ったの？",
    "その質問、深いね。もう少し教えてくれる？",
    "興味深い質問だね！",
    "その疑問、私も考えてみたくなるな。",
];

const LONG_MESSAGE_FOLLOWUPS: &[&str] = &[
    "もっと詳しく聞かせて！",
    "その話、もう少し聞かせてくれない？",
];

const LAUGHTER_LINE: &str = "笑いっていいね、私もつい笑っちゃう！";

const LAUGHTER_MARKERS: &[&str] = &["笑", "www"];

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| (*l).to_string()).collect()
}

// =============================================================================
// Table types
// =============================================================================

/// Extra lines keyed by mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodLines {
    pub happy: Vec<String>,
    pub playful: Vec<String>,
    pub thoughtful: Vec<String>,
    pub serious: Vec<String>,
    pub excited: Vec<String>,
}

impl MoodLines {
    pub fn for_mood(&self, mood: Mood) -> &[String] {
        match mood {
            Mood::Happy => &self.happy,
            Mood::Playful => &self.playful,
            Mood::Thoughtful => &self.thoughtful,
            Mood::Serious => &self.serious,
            Mood::Excited => &self.excited,
        }
    }
}

/// Extra lines for non-neutral sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentLines {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl SentimentLines {
    /// Neutral sentiment has no pool.
    pub fn for_sentiment(&self, sentiment: Sentiment) -> Option<&[String]> {
        match sentiment {
            Sentiment::Positive => Some(&self.positive),
            Sentiment::Negative => Some(&self.negative),
            Sentiment::Neutral => None,
        }
    }
}

/// Every phrase pool the NPC draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTables {
    /// Substrings worth +1 sentiment each.
    pub positive_words: Vec<String>,
    /// Substrings worth -1 sentiment each.
    pub negative_words: Vec<String>,
    pub mood_lines: MoodLines,
    pub sentiment_lines: SentimentLines,
    pub keywords: KeywordTable,
    /// Generic lines used when no topic matches and after topic lines.
    pub fallback_lines: Vec<String>,
    /// "Please tell me more" line for the no-topic branch.
    pub elaborate_line: String,
    pub hesitation_lines: Vec<String>,
    pub question_followups: Vec<String>,
    pub long_message_followups: Vec<String>,
    pub laughter_line: String,
    /// Substrings that count as laughter.
    pub laughter_markers: Vec<String>,
}

impl Default for ResponseTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponseTables {
    /// The built-in phrase tables.
    pub fn builtin() -> Self {
        Self {
            positive_words: owned(POSITIVE_WORDS),
            negative_words: owned(NEGATIVE_WORDS),
            mood_lines: MoodLines {
                happy: owned(HAPPY_LINES),
                playful: owned(PLAYFUL_LINES),
                thoughtful: owned(THOUGHTFUL_LINES),
                serious: owned(SERIOUS_LINES),
                excited: owned(EXCITED_LINES),
            },
            sentiment_lines: SentimentLines {
                positive: owned(POSITIVE_LINES),
                negative: owned(NEGATIVE_LINES),
            },
            keywords: KeywordTable::from_static(KEYWORDS),
            fallback_lines: owned(FALLBACK_LINES),
            elaborate_line: ELABORATE_LINE.to_string(),
            hesitation_lines: owned(HESITATION_LINES),
            question_followups: owned(QUESTION_FOLLOWUPS),
            long_message_followups: owned(LONG_MESSAGE_FOLLOWUPS),
            laughter_line: LAUGHTER_LINE.to_string(),
            laughter_markers: owned(LAUGHTER_MARKERS),
        }
    }

    /// Load tables from a TOML file, filling gaps from the built-ins.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tables: ResponseTables = toml::from_str(&content)?;
        tables.validate()?;
        info!(
            path = %path.display(),
            topics = tables.keywords.len(),
            "Response tables loaded"
        );
        Ok(tables)
    }

    /// Check that every pool the assembler can reach is non-empty and holds
    /// no blank lines.
    pub fn validate(&self) -> Result<()> {
        let pools: [(&str, &[String]); 12] = [
            ("mood_lines.happy", &self.mood_lines.happy),
            ("mood_lines.playful", &self.mood_lines.playful),
            ("mood_lines.thoughtful", &self.mood_lines.thoughtful),
            ("mood_lines.serious", &self.mood_lines.serious),
            ("mood_lines.excited", &self.mood_lines.excited),
            ("sentiment_lines.positive", &self.sentiment_lines.positive),
            ("sentiment_lines.negative", &self.sentiment_lines.negative),
            ("fallback_lines", &self.fallback_lines),
            ("hesitation_lines", &self.hesitation_lines),
            ("question_followups", &self.question_followups),
            ("long_message_followups", &self.long_message_followups),
            ("laughter_markers", &self.laughter_markers),
        ];
        for (name, pool) in pools {
            check_pool(name, pool)?;
        }
        for (name, words) in [
            ("positive_words", &self.positive_words),
            ("negative_words", &self.negative_words),
            ("laughter_markers", &self.laughter_markers),
        ] {
            if let Some(word) = words
                .iter()
                .find(|w| w.trim().is_empty() || **w != w.to_lowercase())
            {
                return Err(GikenError::Config(format!(
                    "{} entry '{}' must be non-blank and lower-case",
                    name, word
                )));
            }
        }
        for entry in self.keywords.entries() {
            if entry.key.is_empty() || entry.key != entry.key.to_lowercase() {
                return Err(GikenError::Config(format!(
                    "keyword '{}' must be non-empty and lower-case",
                    entry.key
                )));
            }
            check_pool(&format!("keywords.{}", entry.key), &entry.lines)?;
        }
        for (name, line) in [
            ("elaborate_line", &self.elaborate_line),
            ("laughter_line", &self.laughter_line),
        ] {
            if line.trim().is_empty() {
                return Err(GikenError::Config(format!("{} must not be blank", name)));
            }
        }
        Ok(())
    }
}

fn check_pool(name: &str, pool: &[String]) -> Result<()> {
    if pool.is_empty() {
        return Err(GikenError::Config(format!("{} must not be empty", name)));
    }
    if pool.iter().any(|l| l.trim().is_empty()) {
        return Err(GikenError::Config(format!("{} contains a blank line", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tables(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builtin_tables_are_valid() {
        let tables = ResponseTables::builtin();
        tables.validate().unwrap();
        assert_eq!(tables.positive_words.len(), 5);
        assert_eq!(tables.negative_words.len(), 5);
        assert_eq!(tables.fallback_lines.len(), 6);
        assert_eq!(tables.hesitation_lines.len(), 5);
        assert_eq!(tables.keywords.len(), 18);
        for entry in tables.keywords.entries() {
            assert!((3..=4).contains(&entry.lines.len()), "{}", entry.key);
        }
    }

    #[test]
    fn test_mood_lines_lookup() {
        let tables = ResponseTables::builtin();
        for mood in Mood::ALL {
            assert_eq!(tables.mood_lines.for_mood(mood).len(), 3);
        }
    }

    #[test]
    fn test_sentiment_lines_neutral_has_none() {
        let tables = ResponseTables::builtin();
        assert!(tables
            .sentiment_lines
            .for_sentiment(Sentiment::Neutral)
            .is_none());
        assert_eq!(
            tables
                .sentiment_lines
                .for_sentiment(Sentiment::Negative)
                .map(|l| l.len()),
            Some(3)
        );
    }

    #[test]
    fn test_from_file_partial_override() {
        let file = write_tables(
            r#"
fallback_lines = ["へえ"]

[[keywords]]
key = "cat"
lines = ["にゃー", "ねこ好き？"]
"#,
        );
        let tables = ResponseTables::from_file(file.path()).unwrap();
        assert_eq!(tables.fallback_lines, vec!["へえ".to_string()]);
        assert_eq!(tables.keywords.len(), 1);
        assert_eq!(tables.keywords.matches("my CAT"), vec!["cat"]);
        // Untouched sections keep built-in values.
        assert_eq!(tables.hesitation_lines.len(), 5);
        assert_eq!(tables.elaborate_line, ELABORATE_LINE);
    }

    #[test]
    fn test_from_file_rejects_empty_pool() {
        let file = write_tables("hesitation_lines = []\n");
        let err = ResponseTables::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("hesitation_lines"));
    }

    #[test]
    fn test_from_file_rejects_upper_case_key() {
        let file = write_tables("[[keywords]]\nkey = \"Cat\"\nlines = [\"x\"]\n");
        assert!(ResponseTables::from_file(file.path()).is_err());
    }

    #[test]
    fn test_from_file_rejects_blank_sentiment_word() {
        let file = write_tables("positive_words = [\"\"]\n");
        let err = ResponseTables::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("positive_words"));
    }

    #[test]
    fn test_validate_rejects_upper_case_sentiment_word() {
        let mut tables = ResponseTables::builtin();
        tables.negative_words.push("Sad".to_string());
        let err = tables.validate().unwrap_err();
        assert!(err.to_string().contains("negative_words"));
    }

    #[test]
    fn test_validate_rejects_blank_line() {
        let mut tables = ResponseTables::builtin();
        tables.fallback_lines.push("   ".to_string());
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = ResponseTables::from_file(Path::new("/nonexistent/tables.toml")).unwrap_err();
        assert!(matches!(err, GikenError::Io(_)));
    }
}
