//! Help text for the memory commands

/// Usage shown by `memory-bot --help`
pub fn execute() -> String {
    "**Memory Commands**\n\n\
    - `!save <key> <value> [#tag ...]` - 記憶を保存 (同じキーは上書き)\n\
    - `!get <key>` - 記憶を表示\n\
    - `!delete <key>` - 記憶を削除\n\
    - `!list [#tag]` - 記憶の一覧 (タグで絞り込み)\n\n\
    **Example:**\n\
    ```\n\
    !save coffee oat latte, no sugar #food #morning\n\
    !list #food\n\
    ```"
        .to_string()
}
