//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes mock analysis and keyword classification over stdio so that
//! assistants editing marketing copy can check target keyword coverage
//! without a live text-analytics service.
//!
//! Each `#[tool]` method delegates to `keyfit-core`; nothing here computes
//! relevance or tiers itself.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use keyfit_core::{
    AnalysisResult, Config, CoverageReport, Features, KeywordClassifier, MockAnalyzer, MockError,
    MockResult,
};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
    /// Features to compute: keywords, entities, concepts, categories.
    /// Omit for the configured set.
    pub features: Option<Vec<String>>,
    /// Maximum keyword entries.
    pub max_keywords: Option<usize>,
    /// Maximum entities.
    pub max_entities: Option<usize>,
    /// Maximum concepts.
    pub max_concepts: Option<usize>,
    /// Maximum categories.
    pub max_categories: Option<usize>,
}

/// Parameters for the `optimize_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct OptimizeTextParams {
    /// The edited copy.
    pub text: String,
    /// Keywords the copy should cover.
    pub target_keywords: Vec<String>,
    /// Earlier analysis whose entities, concepts and categories carry over.
    pub source: Option<AnalysisResult>,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Parameters for the `classify_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ClassifyKeywordsParams {
    /// Keywords to classify.
    pub keywords: Vec<String>,
    /// Analysis result to classify against. Omitted means every keyword is
    /// missing.
    pub result: Option<AnalysisResult>,
}

#[derive(Serialize)]
struct OptimizeResponse {
    result: AnalysisResult,
    coverage: CoverageReport,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

fn mock_error(err: MockError) -> McpError {
    match err {
        MockError::UnknownFeature { .. } | MockError::EmptyInput => {
            McpError::invalid_params(err.to_string(), None)
        }
        MockError::PriorityTokens(_) => McpError::internal_error(err.to_string(), None),
    }
}

/// MCP server exposing keyword classification and mock analysis.
#[derive(Clone)]
pub struct KeyfitServer {
    analyzer: MockAnalyzer,
    classifier: KeywordClassifier,
    features: Features,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for KeyfitServer {
    fn default() -> Self {
        Self::new(
            MockAnalyzer::default(),
            KeywordClassifier::default(),
            Features::default(),
            Some(keyfit_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }
}

#[tool_router]
impl KeyfitServer {
    /// Create a server from already-built components.
    pub fn new(
        analyzer: MockAnalyzer,
        classifier: KeywordClassifier,
        features: Features,
        max_input_bytes: Option<usize>,
    ) -> Self {
        Self {
            analyzer,
            classifier,
            features,
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server using the priority tokens, limits and features from
    /// `config`.
    pub fn from_config(config: &Config, max_input_bytes: Option<usize>) -> MockResult<Self> {
        Ok(Self::new(
            config.analyzer()?,
            config.classifier()?,
            config.features,
            max_input_bytes,
        ))
    }

    fn check_input_size(&self, len: usize) -> Result<(), McpError> {
        if let Some(max) = self.max_input_bytes
            && len > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {len} bytes (limit: {max} bytes)"),
                None,
            ));
        }
        Ok(())
    }

    /// Bytes of `keywords` plus the JSON form of `result`, if any.
    fn payload_len(
        keywords: &[String],
        result: Option<&AnalysisResult>,
    ) -> Result<usize, McpError> {
        let keywords_len: usize = keywords.iter().map(String::len).sum();
        let result_len = match result {
            Some(r) => serde_json::to_vec(r)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
                .len(),
            None => 0,
        };
        Ok(keywords_len + result_len)
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "priority_tokens": self.classifier.priority().tokens(),
                "top_positions": self.classifier.top_positions(),
            }))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Mock text analysis of raw copy.
    #[tool(
        description = "Generate a mock text-analytics result (keywords, entities, concepts, categories) for a piece of copy."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "analyze_text",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );
        self.check_input_size(params.text.len())?;

        let mut features = match params.features {
            Some(ref names) => self.features.select(names).map_err(mock_error)?,
            None => self.features,
        };
        let limits = &mut features.limits;
        if let Some(n) = params.max_keywords {
            limits.keywords = n;
        }
        if let Some(n) = params.max_entities {
            limits.entities = n;
        }
        if let Some(n) = params.max_concepts {
            limits.concepts = n;
        }
        if let Some(n) = params.max_categories {
            limits.categories = n;
        }

        let result = self
            .analyzer
            .analyze_text(&params.text, params.strip_markdown, &features)
            .map_err(mock_error)?;
        let json = to_json(&result)?;

        tracing::info!(
            tool = "analyze_text",
            keywords = result.keyword_entries().len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Keyword-focused re-analysis of edited copy, with coverage.
    #[tool(
        description = "Re-analyze edited copy so target keywords are detected, then report each target's match tier (exact, partial, relevant, missing)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn optimize_text(
        &self,
        Parameters(params): Parameters<OptimizeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "optimize_text",
            targets = params.target_keywords.len(),
            "executing MCP tool"
        );
        let extra = Self::payload_len(&params.target_keywords, params.source.as_ref())?;
        self.check_input_size(params.text.len() + extra)?;

        let content = if params.strip_markdown {
            keyfit_core::markdown::strip_to_prose(&params.text)
        } else {
            params.text
        };
        let source = params.source.unwrap_or_default();
        let result = self
            .analyzer
            .analyze_edit(&source, content.trim(), &params.target_keywords);
        let coverage = self
            .classifier
            .coverage(&params.target_keywords, Some(&result));

        tracing::info!(
            tool = "optimize_text",
            missing = coverage.missing,
            "MCP tool completed"
        );
        let json = to_json(&OptimizeResponse { result, coverage })?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Classify keywords against an analysis result.
    #[tool(
        description = "Classify how strongly each keyword is represented in an analysis result: exact, partial, relevant, or missing."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn classify_keywords(
        &self,
        Parameters(params): Parameters<ClassifyKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "classify_keywords",
            keywords = params.keywords.len(),
            "executing MCP tool"
        );
        self.check_input_size(Self::payload_len(&params.keywords, params.result.as_ref())?)?;

        let coverage = self
            .classifier
            .coverage(&params.keywords, params.result.as_ref());
        let json = to_json(&coverage)?;

        tracing::info!(
            tool = "classify_keywords",
            exact = coverage.exact,
            missing = coverage.missing,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for KeyfitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use analyze_text for a mock analysis of copy, \
                 optimize_text after editing, and classify_keywords to check \
                 target keywords against a result.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
