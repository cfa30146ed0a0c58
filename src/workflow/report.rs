use crate::classify::SkipReason;
use crate::render::RenderSummary;
use serde::Serialize;

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Converted {
        package: String,
        package_dir: String,
        manifest: String,
        document: String,
        summary: RenderSummary,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Per-file outcomes and totals for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub attempted: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn push(&mut self, file: FileReport) {
        self.attempted += 1;
        match file.outcome {
            FileOutcome::Converted { .. } => self.converted += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
        self.files.push(file);
    }
}

const RULE_WIDTH: usize = 50;

/// Human-readable status lines; silent when JSON output is requested.
pub struct Progress {
    enabled: bool,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn rule(&self) {
        println!("{}", "═".repeat(RULE_WIDTH));
    }

    pub fn banner(&self) {
        if !self.enabled {
            return;
        }
        self.rule();
        println!("  CSV转Package工具");
        self.rule();
    }

    pub fn start(&self, source: &str) {
        if self.enabled {
            println!("\n📄 处理: {source}");
        }
    }

    pub fn outcome(&self, outcome: &FileOutcome) {
        if !self.enabled {
            return;
        }
        match outcome {
            FileOutcome::Converted {
                document, summary, ..
            } => {
                println!("✓ 解析到 {} 个用例", summary.cases);
                println!("✓ 生成: {document}");
            }
            FileOutcome::Skipped { reason } => println!("⚠️ 未找到有效用例 ({reason})"),
            FileOutcome::Failed { error } => eprintln!("❌ 失败: {error}"),
        }
    }

    pub fn summary(&self, report: &BatchReport) {
        if !self.enabled {
            return;
        }
        println!();
        self.rule();
        println!("  完成！转换 {}/{} 个文件", report.converted, report.attempted);
        self.rule();
    }
}
