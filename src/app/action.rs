use crate::domain::models::ModelInfo;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Quit,

    // --- Document editing ---
    EditorKey(crossterm::event::KeyEvent),
    SelectAll,

    // --- Mode transitions ---
    OpenPalette,
    OpenSettings,
    OpenCommands,
    ToggleHelp,
    CancelMode, // ESC (close modal / clear selection and error)

    // --- Command palette ---
    PaletteInput(crossterm::event::KeyEvent),
    PaletteNext,
    PalettePrev,
    PaletteSelect, // Fire the highlighted command on the selection

    // --- Generation lifecycle (dispatched by async workers) ---
    GenerationStarted(String),
    GenerationCompleted { command: String, chars: usize },
    GenerationFailed { command: String, message: String },

    // --- Settings modal ---
    SettingsInput(crossterm::event::KeyEvent),
    SettingsNextField,
    SettingsSubmit, // Enter: apply URL / pick model / start pull
    ModelNext,
    ModelPrev,
    ModelsLoaded(Vec<ModelInfo>),
    ModelsLoadFailed(String),

    // --- Command management modal ---
    CommandFormInput(crossterm::event::KeyEvent),
    CommandFormNextField,
    CommandListNext,
    CommandListPrev,
    SubmitNewCommand,
    RemoveSelectedCommand,
    ResetCommands,
    MergeCommands,

    // --- Async results ---
    OperationCompleted(Result<String, String>),
    ErrorOccurred(String),
}
