use thiserror::Error;

/// Erros possíveis durante o parsing e a agregação do histórico de pagamentos
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Falha genérica durante o parsing do conteúdo (detalhe na mensagem)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Soma acumulada excedeu o intervalo representável de `Decimal`
    #[error("Running total overflowed at {date} ({name})")]
    AmountOverflow { date: chrono::NaiveDate, name: String },

    /// Lote de upload sem nenhum arquivo
    #[error("Upload batch contains no files")]
    EmptyBatch,

    /// Um arquivo específico do lote falhou; o lote inteiro é descartado
    #[error("File '{file}' failed: {source}")]
    FileFailed {
        file: String,
        #[source]
        source: Box<HistoryError>,
    },

    // ── Erros específicos de formatos ───────────────────────────────────────────

    /// Data no formato CSV inválida (esperado DD/MM/YYYY)
    #[error("Invalid CSV date format: '{0}'")]
    CsvDateInvalidFormat(String),
}

impl HistoryError {
    pub(crate) fn for_file(file: &str, source: HistoryError) -> Self {
        HistoryError::FileFailed {
            file: file.to_string(),
            source: Box::new(source),
        }
    }
}
