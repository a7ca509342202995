/*!

This is the long-form manual for `climb_cards` and `compcards`.

## Input tables

Three tables are needed. With `compcards`, they are the worksheets of an
Excel workbook (`--input-type excel`, the default) or three CSV files in a
directory (`--input-type csv`).

### `Settings`

Two columns: the name of a setting and its value. Names are not case
sensitive, and the first row may be a header.

| Setting       | Value            |
|---------------|------------------|
| Event Name    | Spring League #2 |
| Climb Count   | 5                |
| Attempt Count | 6                |
| Event Type    | boulder          |
| Scoring Notes | Top = 25, Zone = 10 |

All the settings are required, except the scoring notes. The event type is
either `boulder` or `rope`: it changes the label of the climb rows
(`Boulder 12` or `Climb 12`). At most 10 attempts fit on a card.

### `Climbs`

A header row, then one row per category with the list of climbs separated
by commas:

| Category | Climbs        |
|----------|---------------|
| F10      | 101, 102, 103 |
| M10      | 101, 104, 105 |

A category with an empty list has no climbs yet: its climbers do not get a
card and are reported. If a category appears twice, the last row is used.
Items are kept as written, so `101,,103` prints an empty climb label in
the middle.

### `Registration`

The export of the registration system. The header must contain the
`firstname`, `lastname` and `bib` columns (lowercase), and one column per
category named `<category> boulder ticket`, `<category> lead ticket` or
`<category> rope ticket`. Columns whose name contains `status` are ignored.

A climber is registered in the category of the first ticket column that is
filled. The session is the first number found in that cell (`Session 3 - 9am`
is session `3`); without any number the whole text is the session.

Some exports write a whole row in its first cell, separated by commas. Such
rows are split before being read. Rows of both kinds can be mixed.

## Outputs

- `scorecards.json`: the cards, as a list of cells with their position and style
- `scorecards.csv`: the same cards, as plain text
- `checkin_session_<session>.csv`: one check-in list per session
- `summary.json`: the number of cards and the climbers without a card

Cards are laid out two per page. Every card spans 11 columns: the climb label
and 10 attempt boxes.

*/
