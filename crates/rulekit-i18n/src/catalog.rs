//! Built-in `validation` catalogs.
//!
//! Every catalog carries one entry per predicate name plus `optional`.

/// English messages.
pub const EN_VALIDATION: &[(&str, &str)] = &[
    ("alpha", "The {field} field requires only alphabetic characters."),
    ("alphaNumber", "The {field} field requires only alphabetic and numeric characters."),
    ("array", "The {field} field requires an array."),
    ("base64", "The {field} field requires a valid base64 string."),
    ("between", "The {field} field must be between {0} and {1}."),
    ("bool", "The {field} field requires a boolean value."),
    ("datetime", "The {field} field does not match the required datetime format."),
    ("dim", "The {field} field requires an image with the exact dimensions of {0} in width and {1} in height."),
    ("email", "The {field} field requires a valid email address."),
    ("equals", "The {field} field must be equals the {0} field."),
    ("ext", "The {field} field requires a file with an accepted extension: {args}."),
    ("float", "The {field} field requires a floating point number."),
    ("greater", "The {field} field must be greater than {0}."),
    ("greaterOrEqual", "The {field} field must be greater than or equal to {0}."),
    ("hex", "The {field} field requires a valid hexadecimal string."),
    ("hexColor", "The {field} field requires a valid hexadecimal color."),
    ("image", "The {field} field requires an image."),
    ("in", "The {field} field does not have an allowed value."),
    ("int", "The {field} field requires an integer."),
    ("ip", "The {field} field requires a valid IP address."),
    ("isset", "The {field} field must be sent."),
    ("json", "The {field} field requires a valid JSON string."),
    ("latin", "The {field} field requires only latin characters."),
    ("length", "The {field} field requires exactly {0} characters in length."),
    ("less", "The {field} field must be less than {0}."),
    ("lessOrEqual", "The {field} field must be less than or equal to {0}."),
    ("maxDim", "The {field} field requires an image that does not exceed the maximum dimensions of {0} in width and {1} in height."),
    ("maxLength", "The {field} field requires {0} or less characters in length."),
    ("maxSize", "The {field} field requires a file that does not exceed the maximum size of {0} kilobytes."),
    ("md5", "The {field} field requires a valid MD5 hash."),
    ("mimes", "The {field} field requires a file with an accepted MIME type: {args}."),
    ("minDim", "The {field} field requires an image having the minimum dimensions of {0} in width and {1} in height."),
    ("minLength", "The {field} field requires {0} or more characters in length."),
    ("notBetween", "The {field} field can not be between {0} and {1}."),
    ("notEquals", "The {field} field can not be equals the {0} field."),
    ("notIn", "The {field} field has a disallowed value."),
    ("notRegex", "The {field} field matches a invalid pattern."),
    ("number", "The {field} field requires only numeric characters."),
    ("object", "The {field} field requires an object."),
    ("optional", "The {field} field is optional."),
    ("regex", "The {field} field does not matches the required pattern."),
    ("required", "The {field} field is required."),
    ("specialChar", "The {field} field requires {0} or more special characters."),
    ("string", "The {field} field requires a string."),
    ("timezone", "The {field} field requires a valid timezone."),
    ("uploaded", "The {field} field requires a file to be uploaded."),
    ("url", "The {field} field requires a valid URL address."),
    ("uuid", "The {field} field requires a valid UUID."),
];

/// Brazilian Portuguese messages.
pub const PT_BR_VALIDATION: &[(&str, &str)] = &[
    ("alpha", "O campo {field} requer apenas caracteres alfabéticos."),
    ("alphaNumber", "O campo {field} requer apenas caracteres alfabéticos e numéricos."),
    ("array", "O campo {field} requer um array."),
    ("base64", "O campo {field} requer uma string base64 válida."),
    ("between", "O campo {field} deve estar entre {0} e {1}."),
    ("bool", "O campo {field} requer um valor booleano."),
    ("datetime", "O campo {field} não corresponde ao formato de datetime requerido."),
    ("dim", "O campo {field} requer uma imagem com as dimensões exatas de {0} de largura e {1} de altura."),
    ("email", "O campo {field} requer um endereço de e-mail válido."),
    ("equals", "O campo {field} deve ser igual ao campo {0}."),
    ("ext", "O campo {field} requer um arquivo com uma extensão aceita: {args}."),
    ("float", "O campo {field} requer um número de ponto flutuante."),
    ("greater", "O campo {field} deve ser maior que {0}."),
    ("greaterOrEqual", "O campo {field} deve ser maior ou igual a {0}."),
    ("hex", "O campo {field} requer uma string hexadecimal válida."),
    ("hexColor", "O campo {field} requer uma cor hexadecimal válida."),
    ("image", "O campo {field} requer uma imagem."),
    ("in", "O campo {field} não é um valor permitido."),
    ("int", "O campo {field} requer um número inteiro."),
    ("ip", "O campo {field} requer um endereço de IP válido."),
    ("isset", "O campo {field} deve ser enviado."),
    ("json", "O campo {field} requer uma string JSON válida."),
    ("latin", "O campo {field} requer apenas caracteres latinos."),
    ("length", "O campo {field} requer exatamente {0} caracteres no tamanho."),
    ("less", "O campo {field} deve ser menor que {0}."),
    ("lessOrEqual", "O campo {field} deve ser menor ou igual a {0}."),
    ("maxDim", "O campo {field} requer uma imagem que não exceda as dimensões máximas de {0} de largura e {1} de altura."),
    ("maxLength", "O campo {field} requer menos do que {0} caracteres no tamanho."),
    ("maxSize", "O campo {field} requer um arquivo que não exceda o tamanho máximo de {0} kilobytes."),
    ("md5", "O campo {field} requer um hash MD5 válido."),
    ("mimes", "O campo {field} requer um arquivo com um tipo MIME aceito: {args}."),
    ("minDim", "O campo {field} requer uma imagem com as dimensões mínimas de {0} de largura e {1} de altura."),
    ("minLength", "O campo {field} requer mais do que {0} caracteres no tamanho."),
    ("notBetween", "O campo {field} não pode estar entre {0} e {1}."),
    ("notEquals", "O campo {field} não pode ser igual ao campo {0}."),
    ("notIn", "O campo {field} é um valor não permitido."),
    ("notRegex", "O campo {field} corresponde a um padrão inválido."),
    ("number", "O campo {field} requer apenas caracteres numéricos."),
    ("object", "O campo {field} requer um objeto."),
    ("optional", "O campo {field} é opcional."),
    ("regex", "O campo {field} não corresponde ao padrão requerido."),
    ("required", "O campo {field} é requerido."),
    ("specialChar", "O campo {field} requer {0} ou mais caracteres especiais."),
    ("string", "O campo {field} requer uma string."),
    ("timezone", "O campo {field} requer um fuso horário válido."),
    ("uploaded", "O campo {field} requer um arquivo enviado."),
    ("url", "O campo {field} requer um endereço de URL válido."),
    ("uuid", "O campo {field} requer um UUID válido."),
];

/// Built-in `(locale, entries)` pairs for the `validation` domain.
pub fn builtin() -> [(&'static str, &'static [(&'static str, &'static str)]); 2] {
    [("en", EN_VALIDATION), ("pt-br", PT_BR_VALIDATION)]
}
