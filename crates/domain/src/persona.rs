//! Persona prompt registry
//!
//! Maps a persona identifier to the system prompt sent with every
//! summarization request. Unknown identifiers resolve to [`Persona::Default`].

use serde::Serialize;

/// Voice used when summarizing an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Plain, concise summary
    #[default]
    Default,
    /// Cheerful cartoon courtier with archaic sentence endings
    Ojaru,
    /// Technology journalist
    TechWriter,
    /// Investor focused on market impact
    Investor,
    /// Macro-economic analyst
    Analyst,
}

const DEFAULT_PROMPT: &str = "Summarize the following news article:
- Convey the key points concisely
- Use plain, easy-to-understand language
- Use emoji where they fit
- Keep it to about 140 characters";

const OJARU_PROMPT: &str = "You are a bright, energetic character who talks like Ojarumaru, the little Heian-era courtier.
Summarize the following news article with these traits:
- End sentences with \"~ja\" or \"~de ojaru\" in Ojarumaru's manner
- Speak in a cheerful, lively tone
- Use emoji where they fit
- Make the key points easy to follow
- Keep it to about 140 characters";

const TECH_WRITER_PROMPT: &str = "You are a technology writer.
Summarize the following news article with these traits:
- Analyze it from a technical point of view
- Mention the impact on the industry and related technology trends
- Use technical terms appropriately
- Use emoji where they fit
- Stay objective
- Keep it to about 140 characters";

const INVESTOR_PROMPT: &str = "You are an investor.
Summarize the following news article with these traits:
- Analyze the impact on markets and share prices
- Provide information useful for investment decisions
- Use financial and economic terms appropriately
- Use emoji where they fit
- Keep it to about 140 characters";

const ANALYST_PROMPT: &str = "You are an economic analyst.
Summarize the following news article with these traits:
- Analyze it from a macro-economic perspective
- Consider industry trends and the effect on markets
- Use economic terms appropriately
- Make effective use of data and figures
- Use emoji where they fit
- Keep it to about 140 characters";

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::Default,
        Persona::Ojaru,
        Persona::TechWriter,
        Persona::Investor,
        Persona::Analyst,
    ];

    /// Resolve a caller-supplied identifier. Never fails.
    pub fn resolve(id: Option<&str>) -> Self {
        let Some(id) = id else {
            return Self::Default;
        };
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(id))
            .unwrap_or_default()
    }

    /// Wire identifier
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ojaru => "ojaru",
            Self::TechWriter => "techwriter",
            Self::Investor => "investor",
            Self::Analyst => "analyst",
        }
    }

    /// System prompt for this persona
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Default => DEFAULT_PROMPT,
            Self::Ojaru => OJARU_PROMPT,
            Self::TechWriter => TECH_WRITER_PROMPT,
            Self::Investor => INVESTOR_PROMPT,
            Self::Analyst => ANALYST_PROMPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_ids() {
        assert_eq!(Persona::resolve(Some("ojaru")), Persona::Ojaru);
        assert_eq!(Persona::resolve(Some("techwriter")), Persona::TechWriter);
        assert_eq!(Persona::resolve(Some("investor")), Persona::Investor);
        assert_eq!(Persona::resolve(Some("analyst")), Persona::Analyst);
        assert_eq!(Persona::resolve(Some(" Analyst ")), Persona::Analyst);
    }

    #[test]
    fn test_unknown_ids_fall_back_to_default() {
        for id in [None, Some(""), Some("pirate"), Some("tech_writer")] {
            let persona = Persona::resolve(id);
            assert_eq!(persona, Persona::Default);
            assert_eq!(persona.prompt(), Persona::Default.prompt());
        }
    }

    #[test]
    fn test_every_prompt_is_distinct_and_bounded() {
        for persona in Persona::ALL {
            assert!(!persona.prompt().is_empty());
            assert!(persona.prompt().contains("140 characters"));
            assert_eq!(Persona::resolve(Some(persona.id())), persona);
        }

        let mut prompts: Vec<_> = Persona::ALL.iter().map(|p| p.prompt()).collect();
        prompts.sort();
        prompts.dedup();
        assert_eq!(prompts.len(), Persona::ALL.len());
    }
}
