//! Built without debug info to check that traces degrade to placeholders.
