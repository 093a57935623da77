//! Per-tool interface state as an explicit struct plus a pure reducer.
//!
//! Every tool page walks the same cycle: `Idle -> Reading -> Parsing ->
//! Processing -> Exporting -> Idle`, with `Error` reachable from the reading,
//! parsing, and processing stages. A new upload restarts the cycle from any phase
//! (last-start-wins), and chunk files already handed to the user are never
//! retracted, so the exported count survives a later failure.

/// Lifecycle phase of a tool instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolPhase {
    /// Waiting for an upload.
    #[default]
    Idle,
    /// Reading the uploaded bytes.
    Reading,
    /// Parsing rows out of the file.
    Parsing,
    /// Running the reconciliation.
    Processing,
    /// Generating and delivering output files.
    Exporting,
    /// Terminal failure for the current operation; a retry starts a new cycle.
    Error,
}

/// Full interface state for one tool instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolState {
    /// Current lifecycle phase.
    pub phase: ToolPhase,
    /// Human-readable status line for the current stage, if any.
    pub status: Option<String>,
    /// Message of the failure that moved the tool into [`ToolPhase::Error`].
    pub error: Option<String>,
    /// Rows extracted by the parse stage of the current cycle.
    pub rows_loaded: usize,
    /// Output files already delivered in the current cycle.
    pub files_exported: usize,
}

/// Everything that can happen to a tool instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolEvent {
    /// A file was chosen; restarts the cycle from any phase.
    UploadStarted {
        /// Status line to show while reading.
        status: String,
    },
    /// Raw bytes are fully read.
    ReadFinished,
    /// Rows were extracted.
    ParseFinished {
        /// Number of rows extracted.
        rows: usize,
    },
    /// Reconciliation finished.
    ProcessFinished {
        /// Status line describing the result.
        status: String,
    },
    /// One output file was delivered.
    FileDelivered,
    /// All output files were delivered.
    ExportFinished,
    /// The current stage failed.
    Failed {
        /// Failure message to surface.
        message: String,
    },
    /// Clear a failure and return to idle.
    Reset,
}

/// Pure transition function; consumes the previous state and returns the next.
pub fn reduce(state: ToolState, event: ToolEvent) -> ToolState {
    match event {
        ToolEvent::UploadStarted { status } => ToolState {
            phase: ToolPhase::Reading,
            status: Some(status),
            error: None,
            rows_loaded: 0,
            files_exported: 0,
        },
        ToolEvent::ReadFinished => ToolState {
            phase: ToolPhase::Parsing,
            ..state
        },
        ToolEvent::ParseFinished { rows } => ToolState {
            phase: ToolPhase::Processing,
            rows_loaded: rows,
            ..state
        },
        ToolEvent::ProcessFinished { status } => ToolState {
            phase: ToolPhase::Exporting,
            status: Some(status),
            ..state
        },
        ToolEvent::FileDelivered => ToolState {
            files_exported: state.files_exported + 1,
            ..state
        },
        ToolEvent::ExportFinished => ToolState {
            phase: ToolPhase::Idle,
            ..state
        },
        ToolEvent::Failed { message } => ToolState {
            phase: ToolPhase::Error,
            error: Some(message),
            status: None,
            // Deliveries cannot be undone, so the count stays.
            ..state
        },
        ToolEvent::Reset => ToolState {
            phase: ToolPhase::Idle,
            error: None,
            ..state
        },
    }
}
