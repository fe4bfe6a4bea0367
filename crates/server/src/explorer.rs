const EXPLORER_CDN: &str =
    "https://embeddable-explorer.cdn.apollographql.com/_latest/embeddable-explorer.umd.production.min.js";

const EXPLORER_HEAD: &str = constcat::concat!(
    "<!DOCTYPE html>\n",
    "<html lang=\"en\">\n",
    "<head>\n",
    "<meta charset=\"utf-8\" />\n",
    "<title>Embedded Explorer</title>\n",
    "<script src=\"",
    EXPLORER_CDN,
    "\"></script>\n",
    "</head>\n",
    "<body style=\"margin: 0; overflow-x: hidden; overflow-y: hidden; height: 100vh; width: 100vw\" id=\"embeddableExplorer\"></body>\n",
);

/// Renders the embedded explorer page seeded with the schema SDL.
pub fn explorer(sdl: &str) -> String {
    let schema = sdl
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "")
        .replace('\n', "\\n");
    format!(
        "{EXPLORER_HEAD}<script>\n\
         const schema = \"{schema}\";\n\
         new EmbeddedExplorer({{\n\
         \ttarget: '#embeddableExplorer',\n\
         \tendpointUrl: '/graphql',\n\
         \tschema,\n\
         }});\n\
         </script>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::explorer;

    #[test]
    fn sdl_is_escaped_into_a_single_js_string_test() {
        let html = explorer("type Query {\n  \"docs\"\n  me: String\n}");
        assert!(html.contains("const schema = \"type Query {\\n  \\\"docs\\\"\\n  me: String\\n}\";"));
        assert!(html.contains("endpointUrl: '/graphql'"));
        assert!(html.contains("new EmbeddedExplorer"));
    }
}
