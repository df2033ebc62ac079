/// All actions/events in the dashboard following The Elm Architecture (TEA)
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Application Control =====
    Quit,

    // ===== Navigation =====
    NavigateUp,
    NavigateDown,
    NavigatePageUp,
    NavigatePageDown,
    NavigateHome,
    NavigateEnd,
    EnterSelected,
    GoBack,
    SwitchPanel,

    // ===== UI State Changes =====
    ShowHelp,
    ShowFilterPrompt,
    CycleSort,

    // ===== Upload =====
    ShowUploadPrompt,
    CancelUpload,

    // ===== Delete Confirmation =====
    ShowDeleteConfirmation,
    ConfirmDialogLeft,
    ConfirmDialogRight,
    ConfirmDialogSubmit,

    // ===== Input Mode =====
    InputChar { c: char },
    InputBackspace,
    InputDelete,
    InputLeft,
    InputRight,
    InputHome,
    InputEnd,
    InputSubmit,
    InputCancel,

    // ===== Error/Success Messages =====
    Clear,
}
